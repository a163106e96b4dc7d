use chrono::{Datelike, Local, Months, NaiveDate};

use crate::constants::{CURRENCY_SYMBOL, DATE_FORMAT};
use crate::models::TransactionKind;

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// Two decimals with thousands separators: `1234.5` -> `"1,234.50"`.
pub fn format_money(amount: f64) -> String {
    if !amount.is_finite() {
        return "0.00".to_string();
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, fraction)
}

pub fn format_peso(amount: f64) -> String {
    if amount < 0.0 {
        format!("-{}{}", CURRENCY_SYMBOL, format_money(-amount))
    } else {
        format!("{}{}", CURRENCY_SYMBOL, format_money(amount))
    }
}

/// History rows: income is prefixed with `+`, everything shows its absolute value.
pub fn format_signed_peso(amount: f64, kind: Option<TransactionKind>) -> String {
    let sign = if kind == Some(TransactionKind::Income) {
        "+"
    } else {
        ""
    };
    format!("{}{}", sign, format_peso(amount.abs()))
}

/// Short axis label: `₱1.2M`, `₱12k`, `₱950`.
pub fn format_compact_peso(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{}{:.1}M", CURRENCY_SYMBOL, value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{}{:.0}k", CURRENCY_SYMBOL, value / 1_000.0)
    } else {
        format!("{}{:.0}", CURRENCY_SYMBOL, value)
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Parses `YYYY-MM-DD`, ignoring any `T...` time suffix.
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let date_part = date_str.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_date_long(date_str: &str) -> String {
    parse_date(date_str)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| date_str.to_string())
}

pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Signed whole days from `today` to `target`. Negative means overdue.
///
/// Both sides are calendar dates, so this is the midnight-normalized
/// difference and never has a fractional part to round.
pub fn days_left(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

/// `None` when `target` is not a valid date; callers treat that as expired.
pub fn days_left_str(target: &str, today: NaiveDate) -> Option<i64> {
    parse_date(target).map(|d| days_left(d, today))
}

pub fn is_expired(target: &str, today: NaiveDate) -> bool {
    days_left_str(target, today).is_none_or(|days| days < 0)
}

// ---------------------------------------------------------------------------
// Months
// ---------------------------------------------------------------------------

pub fn get_month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "???",
    }
}

pub fn get_short_month_name(month: u32) -> &'static str {
    get_month_name(month).get(..3).unwrap_or("???")
}

pub fn format_month(year: i32, month: u32) -> String {
    format!("{} {}", get_month_name(month), year)
}

/// First day of the month, `None` for an out-of-range month.
pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    first_of_month(year, month)
        .and_then(|start| start.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Inclusive `(start, end)` date strings covering the month.
pub fn get_month_range(year: i32, month: u32) -> Option<(String, String)> {
    let start = first_of_month(year, month)?;
    let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
    Some((format_date(start), format_date(end)))
}

/// Moves `(year, month)` by `delta` months.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}
