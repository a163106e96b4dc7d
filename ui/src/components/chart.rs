use chrono::Datelike;
use dioxus::prelude::*;
use jubuddy::buckets::{ChartRange, bucket_month, bucket_range, bucket_totals, default_selection, month_series};
use jubuddy::chart::{ChartFrame, ValueDomain, area_path, line_path, y_axis_labels};
use jubuddy::models::Transaction;
use jubuddy::utils::{format_month, format_peso, shift_month, today_local};

#[derive(Clone, Copy, PartialEq)]
enum ChartMode {
    Month,
    Range(ChartRange),
}

#[component]
pub fn StatisticsChart(transactions: Vec<Transaction>) -> Element {
    let today = today_local();
    let mut mode = use_signal(|| ChartMode::Month);
    let mut year = use_signal(|| today.year());
    let mut month = use_signal(|| today.month());

    let tabs = std::iter::once(("MONTH", ChartMode::Month)).chain(
        ChartRange::all()
            .iter()
            .map(|range| (range.label(), ChartMode::Range(*range))),
    );

    rsx! {
        div { class: "dashboard-block chart-block",
            div { class: "flex gap-2 items-center",
                h2 { "STATISTICS" }
                div { class: "chart-tabs",
                    for (label, tab) in tabs {
                        button {
                            class: if mode() == tab { "active" } else { "" },
                            onclick: move |_| mode.set(tab),
                            "{label}"
                        }
                    }
                }
            }

            match mode() {
                ChartMode::Month => rsx! {
                    div { class: "month-selector",
                        button {
                            onclick: move |_| {
                                let (y, m) = shift_month(year(), month(), -1);
                                year.set(y);
                                month.set(m);
                            },
                            "<"
                        }
                        span { class: "month-text", "{format_month(year(), month())}" }
                        button {
                            onclick: move |_| {
                                let (y, m) = shift_month(year(), month(), 1);
                                year.set(y);
                                month.set(m);
                            },
                            ">"
                        }
                    }
                    MonthChart { transactions: transactions.clone(), year: year(), month: month() }
                },
                ChartMode::Range(range) => rsx! {
                    RangeBars { transactions: transactions.clone(), range: range }
                },
            }
        }
    }
}

#[component]
fn MonthChart(transactions: Vec<Transaction>, year: i32, month: u32) -> Element {
    let buckets = bucket_month(&transactions, year, month);
    let (income_total, expense_total) = bucket_totals(&buckets);
    let (income, expense) = month_series(&buckets);

    let frame = ChartFrame::default();
    let domain = ValueDomain::with_default_headroom(&[income.as_slice(), expense.as_slice()]);
    let income_area = area_path(&income, &domain, &frame);
    let income_line = line_path(&income, &domain, &frame);
    let expense_area = area_path(&expense, &domain, &frame);
    let expense_line = line_path(&expense, &domain, &frame);
    let labels = y_axis_labels(&domain);

    rsx! {
        div { class: "chart",
            div { class: "chart-axis",
                for label in labels {
                    span { "{label}" }
                }
            }
            svg {
                class: "chart-svg",
                "viewBox": "{frame.view_box()}",
                "preserveAspectRatio": "none",
                path { class: "area income", d: "{income_area}" }
                path { class: "line income", d: "{income_line}", fill: "none" }
                path { class: "area expense", d: "{expense_area}" }
                path { class: "line expense", d: "{expense_line}", fill: "none" }
            }
        }
        div { class: "chart-legend",
            span { class: "income", "INCOME {format_peso(income_total)}" }
            span { class: "expense", "EXPENSE {format_peso(expense_total)}" }
        }
    }
}

#[component]
fn RangeBars(transactions: Vec<Transaction>, range: ChartRange) -> Element {
    let today = today_local();
    let buckets = bucket_range(&transactions, range, today);
    // A selection only applies to the range it was made in.
    let mut selected = use_signal(|| None::<(ChartRange, usize)>);
    let current = selected()
        .filter(|(r, _)| *r == range)
        .map(|(_, index)| index)
        .or_else(|| default_selection(&buckets, today));
    let max = buckets
        .iter()
        .map(|b| b.income.max(b.expense))
        .fold(0.0_f64, f64::max);
    let height = |value: f64| if max > 0.0 { value / max * 100.0 } else { 0.0 };

    rsx! {
        div { class: "range-bars",
            for (index, bucket) in buckets.iter().enumerate() {
                div {
                    key: "{index}",
                    class: if current == Some(index) { "range-bar selected" } else { "range-bar" },
                    onclick: move |_| selected.set(Some((range, index))),
                    div { class: "bar-pair",
                        div { class: "bar income", style: "height: {height(bucket.income)}%" }
                        div { class: "bar expense", style: "height: {height(bucket.expense)}%" }
                    }
                    span { class: "bar-number", "{bucket.number(range, index)}" }
                    span { class: "bar-label", "{bucket.label(range)}" }
                }
            }
        }
        if let Some(bucket) = current.and_then(|i| buckets.get(i)) {
            div { class: "chart-legend",
                span { class: "income", "INCOME {format_peso(bucket.income)}" }
                span { class: "expense", "EXPENSE {format_peso(bucket.expense)}" }
            }
        }
    }
}
