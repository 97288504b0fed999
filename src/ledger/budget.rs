use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A spending guardrail for one category in one calendar month. Unique per
/// (user, category, year, month); the service layer upserts on conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub year: i32,
    pub month: u32,
    pub amount_cents: i64,
    /// Fraction of the limit at which the budget turns into a warning.
    pub notify_threshold: f64,
}

pub const DEFAULT_NOTIFY_THRESHOLD: f64 = 0.8;

impl Budget {
    pub fn new(user_id: Uuid, category_id: Uuid, year: i32, month: u32, amount_cents: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            category_id,
            year,
            month,
            amount_cents,
            notify_threshold: DEFAULT_NOTIFY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetStatus {
    Ok,
    Warning,
    Exceeded,
}

/// A budget together with the month's actual spend in its category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetReport {
    pub budget: Budget,
    pub spent_cents: i64,
    pub remaining_cents: i64,
    pub percent: f64,
    pub status: BudgetStatus,
}

impl BudgetReport {
    pub fn compute(budget: Budget, spent_cents: i64) -> Self {
        let percent = if budget.amount_cents > 0 {
            spent_cents as f64 / budget.amount_cents as f64
        } else {
            0.0
        };
        let status = if percent >= 1.0 {
            BudgetStatus::Exceeded
        } else if percent >= budget.notify_threshold {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Ok
        };
        Self {
            remaining_cents: budget.amount_cents - spent_cents,
            budget,
            spent_cents,
            percent,
            status,
        }
    }
}
