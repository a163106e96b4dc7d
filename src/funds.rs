//! Adding to and withdrawing from a goal's savings.
//!
//! Everything here is pure. The caller only sends the resulting
//! [`UpdateFundsPayload`] once [`plan_funds_change`] has succeeded.

use crate::error::ValidationError;
use crate::models::{Goal, UpdateFundsPayload};
use crate::utils::format_money;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundsMode {
    Add,
    Reduce,
}

impl FundsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FundsMode::Add => "add",
            FundsMode::Reduce => "reduce",
        }
    }
}

/// Largest amount the form accepts: what is left to save when adding,
/// what is saved when reducing.
pub fn funds_limit(actual: f64, target: f64, mode: FundsMode) -> f64 {
    match mode {
        FundsMode::Add => (target - actual).max(0.0),
        FundsMode::Reduce => actual.max(0.0),
    }
}

/// Saved amount after the change, clamped to `[0, target]`.
pub fn apply_funds(actual: f64, target: f64, mode: FundsMode, amount: f64) -> f64 {
    match mode {
        FundsMode::Add => (actual + amount).min(target),
        FundsMode::Reduce => (actual - amount).max(0.0),
    }
}

/// Parses the raw form input and checks it against `max_limit`.
pub fn validate_funds_amount(
    raw: &str,
    mode: FundsMode,
    max_limit: Option<f64>,
) -> Result<f64, ValidationError> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidAmount)?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::InvalidAmount);
    }

    match max_limit {
        Some(limit) if amount > limit => {
            let limit = format_money(limit);
            return Err(match mode {
                FundsMode::Reduce => ValidationError::ExceedsSavings { limit },
                FundsMode::Add => ValidationError::ExceedsRemaining { limit },
            });
        }
        _ => {}
    }

    Ok(amount)
}

/// A validated funds change, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct FundsChange {
    pub mode: FundsMode,
    pub amount: f64,
    pub new_actual: f64,
}

impl FundsChange {
    pub fn payload(&self, goal_id: i64) -> UpdateFundsPayload {
        UpdateFundsPayload {
            goal_id,
            mode: self.mode.as_str().to_string(),
            amount: self.amount,
            actual_value: self.new_actual,
        }
    }
}

pub fn plan_funds_change(
    goal: &Goal,
    mode: FundsMode,
    raw: &str,
) -> Result<FundsChange, ValidationError> {
    let limit = funds_limit(goal.actual_value, goal.target_value, mode);
    let amount = validate_funds_amount(raw, mode, Some(limit))?;
    Ok(FundsChange {
        mode,
        amount,
        new_actual: apply_funds(goal.actual_value, goal.target_value, mode, amount),
    })
}
