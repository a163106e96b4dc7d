use std::cmp::Ordering;
use std::collections::HashMap;

use crate::constants::UNCATEGORIZED_LABEL;
use crate::error::ValidationError;
use crate::models::{CreateTransactionPayload, Transaction, TransactionKind, UserId};
use crate::utils::{format_date, parse_date};

/// The most recent expense: latest date first, then the highest id.
///
/// Dates that do not parse sort before every valid date.
pub fn latest_expense(transactions: &[Transaction]) -> Option<&Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.is_expense())
        .max_by(|a, b| compare_recency(a, b))
}

fn compare_recency(a: &Transaction, b: &Transaction) -> Ordering {
    parse_date(&a.date)
        .cmp(&parse_date(&b.date))
        .then_with(|| a.id.cmp(&b.id))
}

/// Lowercase-then-capitalize, e.g. `"FOOD"` -> `"Food"`.
pub fn category_label(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNCATEGORIZED_LABEL.to_string();
    }
    let lower = trimmed.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => UNCATEGORIZED_LABEL.to_string(),
    }
}

fn category_key(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNCATEGORIZED_LABEL.to_lowercase()
    } else {
        trimmed.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub key: String,
    pub label: String,
    pub total: f64,
}

/// Expense totals per category, largest first.
///
/// Categories are grouped case-insensitively, so `FOOD` and `food` merge
/// into one `Food` row. Blank categories go to `Uncategorized`.
pub fn expense_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<String, CategoryTotal> = HashMap::new();

    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        let key = category_key(&tx.category);
        totals
            .entry(key.clone())
            .or_insert_with(|| CategoryTotal {
                key,
                label: category_label(&tx.category),
                total: 0.0,
            })
            .total += tx.amount;
    }

    let mut rows: Vec<CategoryTotal> = totals.into_values().collect();
    rows.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
    rows
}

/// Bar width for a category row, as a percentage of the largest row.
pub fn share_of_max(total: f64, rows: &[CategoryTotal]) -> f64 {
    let max = rows.iter().map(|r| r.total).fold(0.0_f64, f64::max);
    if max > 0.0 { total / max * 100.0 } else { 0.0 }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub income: f64,
    pub expense: f64,
    pub count: usize,
}

impl Summary {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    transactions
        .iter()
        .fold(Summary::default(), |mut summary, tx| match tx.kind() {
            Some(TransactionKind::Income) => {
                summary.income += tx.amount;
                summary.count += 1;
                summary
            }
            Some(TransactionKind::Expense) => {
                summary.expense += tx.amount;
                summary.count += 1;
                summary
            }
            None => summary,
        })
}

/// Percent change from `previous` to `current`; `None` when there is no baseline.
pub fn growth_percentage(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        None
    } else {
        Some((current - previous) / previous.abs() * 100.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl HistoryFilter {
    pub fn all() -> &'static [HistoryFilter] {
        &[HistoryFilter::All, HistoryFilter::Income, HistoryFilter::Expense]
    }

    pub fn label(&self) -> &'static str {
        match self {
            HistoryFilter::All => "All",
            HistoryFilter::Income => "Income",
            HistoryFilter::Expense => "Expenses",
        }
    }

    fn accepts(&self, tx: &Transaction) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Income => tx.is_income(),
            HistoryFilter::Expense => tx.is_expense(),
        }
    }
}

/// Transaction history rows, newest first.
pub fn filter_history<'a>(
    transactions: &'a [Transaction],
    search: &str,
    filter: HistoryFilter,
) -> Vec<&'a Transaction> {
    let needle = search.trim().to_lowercase();
    let mut rows: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| filter.accepts(tx))
        .filter(|tx| needle.is_empty() || tx.description.to_lowercase().contains(&needle))
        .collect();
    rows.sort_by(|a, b| compare_recency(b, a));
    rows
}

/// Raw input of the add-transaction form.
#[derive(Debug, Clone)]
pub struct NewTransactionForm {
    pub kind: TransactionKind,
    pub amount: String,
    pub category: String,
    pub payment_method: String,
    pub date: String,
    pub description: String,
}

pub fn validate_new_transaction(
    form: &NewTransactionForm,
    user_id: UserId,
) -> Result<CreateTransactionPayload, ValidationError> {
    let amount = form
        .amount
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or(ValidationError::InvalidAmount)?;

    let category = form.category.trim();
    if category.is_empty() {
        return Err(ValidationError::Required("Category"));
    }
    let payment_method = form.payment_method.trim();
    if payment_method.is_empty() {
        return Err(ValidationError::Required(match form.kind {
            TransactionKind::Income => "Income source",
            TransactionKind::Expense => "Payment method",
        }));
    }
    let date = parse_date(&form.date).ok_or(ValidationError::InvalidDate)?;

    Ok(CreateTransactionPayload {
        user_id,
        kind: form.kind.as_str().to_string(),
        amount,
        category: category.to_string(),
        payment_method: payment_method.to_string(),
        date: format_date(date),
        description: form.description.trim().to_string(),
    })
}
