//! Grouping transactions into chart buckets.

use chrono::{Datelike, Duration, NaiveDate};

use crate::constants::{MONTH_BUCKET_SLOTS, RANGE_BUCKET_COUNT};
use crate::models::{Transaction, TransactionKind};
use crate::utils::{
    days_in_month, first_of_month, format_date, get_short_month_name, parse_date, shift_month,
};

/// One day of a month chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    /// Day of month, 1-based.
    pub day: u32,
    /// `YYYY-MM-DD`, `None` for padding slots past the end of the month.
    pub date: Option<String>,
    pub income: f64,
    pub expense: f64,
}

impl DayBucket {
    pub fn is_valid(&self) -> bool {
        self.date.is_some()
    }
}

fn add_to(income: &mut f64, expense: &mut f64, tx: &Transaction) {
    match tx.kind() {
        Some(TransactionKind::Income) => *income += tx.amount,
        Some(TransactionKind::Expense) => *expense += tx.amount,
        None => {}
    }
}

/// Daily income/expense sums for a month, always 31 slots long.
///
/// Slots after the last day of the month are padding and stay zero, which
/// keeps the series length fixed when switching between months. A
/// transaction lands in a slot only when its date string equals the slot's
/// `YYYY-MM-DD` exactly.
pub fn bucket_month(transactions: &[Transaction], year: i32, month: u32) -> Vec<DayBucket> {
    let month_days = days_in_month(year, month);

    let mut buckets: Vec<DayBucket> = (1..=MONTH_BUCKET_SLOTS as u32)
        .map(|day| DayBucket {
            day,
            date: if day <= month_days {
                NaiveDate::from_ymd_opt(year, month, day).map(format_date)
            } else {
                None
            },
            income: 0.0,
            expense: 0.0,
        })
        .collect();

    for tx in transactions {
        if let Some(bucket) = buckets
            .iter_mut()
            .find(|b| b.date.as_deref() == Some(tx.date.as_str()))
        {
            add_to(&mut bucket.income, &mut bucket.expense, tx);
        }
    }

    buckets
}

/// `(income, expense)` over the valid slots.
pub fn bucket_totals(buckets: &[DayBucket]) -> (f64, f64) {
    buckets
        .iter()
        .filter(|b| b.is_valid())
        .fold((0.0, 0.0), |(income, expense), b| {
            (income + b.income, expense + b.expense)
        })
}

/// Income and expense series over the valid slots, for charting.
pub fn month_series(buckets: &[DayBucket]) -> (Vec<f64>, Vec<f64>) {
    buckets
        .iter()
        .filter(|b| b.is_valid())
        .map(|b| (b.income, b.expense))
        .unzip()
}

// ---------------------------------------------------------------------------
// Rolling ranges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartRange {
    Days,
    Weeks,
    Months,
}

impl ChartRange {
    pub fn all() -> &'static [ChartRange] {
        &[ChartRange::Days, ChartRange::Weeks, ChartRange::Months]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartRange::Days => "Days",
            ChartRange::Weeks => "Weeks",
            ChartRange::Months => "Months",
        }
    }
}

/// An inclusive date window with its sums.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeBucket {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub income: f64,
    pub expense: f64,
}

impl RangeBucket {
    fn empty(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            income: 0.0,
            expense: 0.0,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Two-digit number shown above the label.
    pub fn number(&self, range: ChartRange, index: usize) -> String {
        match range {
            ChartRange::Days => format!("{:02}", self.end.day()),
            ChartRange::Weeks => format!("{:02}", index + 1),
            ChartRange::Months => format!("{:02}", self.start.month()),
        }
    }

    pub fn label(&self, range: ChartRange) -> String {
        match range {
            ChartRange::Days => self.end.format("%a").to_string(),
            ChartRange::Weeks => "Wk".to_string(),
            ChartRange::Months => get_short_month_name(self.start.month()).to_string(),
        }
    }
}

fn range_windows(range: ChartRange, today: NaiveDate) -> Vec<RangeBucket> {
    let last = RANGE_BUCKET_COUNT as i64 - 1;
    (0..RANGE_BUCKET_COUNT as i64)
        .filter_map(|i| match range {
            ChartRange::Days => {
                let day = today - Duration::days(last - i);
                Some(RangeBucket::empty(day, day))
            }
            ChartRange::Weeks => {
                let end = today - Duration::days((last - i) * 7);
                Some(RangeBucket::empty(end - Duration::days(6), end))
            }
            ChartRange::Months => {
                let (year, month) = shift_month(today.year(), today.month(), (i - last) as i32);
                let start = first_of_month(year, month)?;
                let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
                Some(RangeBucket::empty(start, end))
            }
        })
        .collect()
}

/// Thirteen windows ending today: days, seven-day weeks, or calendar months.
///
/// Transactions with unparseable dates or unknown types are skipped.
pub fn bucket_range(
    transactions: &[Transaction],
    range: ChartRange,
    today: NaiveDate,
) -> Vec<RangeBucket> {
    let mut buckets = range_windows(range, today);

    for tx in transactions {
        let Some(date) = parse_date(&tx.date) else {
            continue;
        };
        if let Some(bucket) = buckets.iter_mut().find(|b| b.contains(date)) {
            add_to(&mut bucket.income, &mut bucket.expense, tx);
        }
    }

    buckets
}

/// Index of the bucket holding `today`, or the most recent bucket.
pub fn default_selection(buckets: &[RangeBucket], today: NaiveDate) -> Option<usize> {
    buckets
        .iter()
        .position(|b| b.contains(today))
        .or_else(|| buckets.len().checked_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: i64, date: &str, amount: f64, kind: &str) -> Transaction {
        Transaction {
            id,
            amount,
            kind: kind.to_string(),
            date: date.to_string(),
            category: String::new(),
            description: String::new(),
            payment_method: None,
        }
    }

    #[test]
    fn short_months_are_padded() {
        let buckets = bucket_month(&[], 2023, 2);
        assert_eq!(buckets.len(), 31);
        assert_eq!(buckets.iter().filter(|b| b.is_valid()).count(), 28);
        assert_eq!(buckets[27].date.as_deref(), Some("2023-02-28"));
        assert!(!buckets[28].is_valid());
        assert_eq!(buckets[30].day, 31);
    }

    #[test]
    fn dates_must_match_exactly() {
        let buckets = bucket_month(
            &[
                tx(1, "2024-03-05T10:00:00", 10.0, "expense"),
                tx(2, "2024-3-5", 10.0, "expense"),
                tx(3, "2024-03-05", 10.0, "Expense"),
            ],
            2024,
            3,
        );
        assert_eq!(buckets[4].expense, 10.0);
    }

    #[test]
    fn weeks_cover_seven_days() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let buckets = bucket_range(
            &[
                tx(1, "2024-03-25", 5.0, "income"),
                tx(2, "2024-03-24", 7.0, "income"),
            ],
            ChartRange::Weeks,
            today,
        );
        assert_eq!(buckets.len(), 13);
        let last = buckets.last().unwrap();
        assert_eq!(last.start, NaiveDate::from_ymd_opt(2024, 3, 25).unwrap());
        assert_eq!(last.income, 5.0);
        assert_eq!(buckets[11].income, 7.0);
    }

    #[test]
    fn months_cross_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let buckets = bucket_range(&[tx(1, "2023-02-14", 3.0, "expense")], ChartRange::Months, today);
        assert_eq!(buckets.first().unwrap().start, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert_eq!(buckets.first().unwrap().expense, 3.0);
        assert_eq!(buckets.last().unwrap().end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(buckets.last().unwrap().label(ChartRange::Months), "Feb");
    }

    #[test]
    fn selection_prefers_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let buckets = bucket_range(&[], ChartRange::Days, today);
        assert_eq!(default_selection(&buckets, today), Some(12));
        let later = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(default_selection(&buckets, later), Some(12));
        assert_eq!(default_selection(&[], today), None);
    }
}
