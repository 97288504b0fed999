//! Per-category monthly budgets with spend tracking.

use uuid::Uuid;

use crate::core::services::month_bounds;
use crate::errors::{CoreError, CoreResult};
use crate::ledger::{Budget, BudgetReport, BudgetStatus, TransactionKind};
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct BudgetUpsert {
    pub category_id: Uuid,
    pub year: i32,
    pub month: u32,
    pub amount_cents: i64,
    pub notify_threshold: Option<f64>,
}

pub struct BudgetService;

impl BudgetService {
    /// Creates or replaces the budget for (category, year, month) and
    /// returns it with the month's spend already computed.
    pub fn upsert(store: &mut Store, user_id: Uuid, data: BudgetUpsert) -> CoreResult<BudgetReport> {
        store
            .user(user_id)
            .ok_or(CoreError::UserNotFound(user_id))?;
        match store.category(data.category_id) {
            Some(category) if category.user_id == user_id => {}
            _ => return Err(CoreError::CategoryNotFound(data.category_id)),
        }
        if data.amount_cents <= 0 {
            return Err(CoreError::Validation("budget amount must be positive".into()));
        }
        if !(1..=12).contains(&data.month) {
            return Err(CoreError::Validation(format!(
                "month must be 1..=12, got {}",
                data.month
            )));
        }
        if let Some(threshold) = data.notify_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(CoreError::Validation(
                    "notify_threshold must be within 0.0..=1.0".into(),
                ));
            }
        }

        let budget = match store.budget_mut(user_id, data.category_id, data.year, data.month) {
            Some(existing) => {
                existing.amount_cents = data.amount_cents;
                if let Some(threshold) = data.notify_threshold {
                    existing.notify_threshold = threshold;
                }
                existing.clone()
            }
            None => {
                let mut budget = Budget::new(
                    user_id,
                    data.category_id,
                    data.year,
                    data.month,
                    data.amount_cents,
                );
                if let Some(threshold) = data.notify_threshold {
                    budget.notify_threshold = threshold;
                }
                store.add_budget(budget.clone());
                budget
            }
        };
        Self::report(store, user_id, budget)
    }

    /// All budgets of the month with spend status; `alerts_only` keeps just
    /// warnings and exceeded ones.
    pub fn list(
        store: &Store,
        user_id: Uuid,
        year: i32,
        month: u32,
        alerts_only: bool,
    ) -> CoreResult<Vec<BudgetReport>> {
        store
            .user(user_id)
            .ok_or(CoreError::UserNotFound(user_id))?;
        let budgets: Vec<Budget> = store
            .budgets_for_month(user_id, year, month)
            .into_iter()
            .cloned()
            .collect();
        let mut reports = Vec::with_capacity(budgets.len());
        for budget in budgets {
            let report = Self::report(store, user_id, budget)?;
            if !alerts_only || matches!(report.status, BudgetStatus::Warning | BudgetStatus::Exceeded) {
                reports.push(report);
            }
        }
        Ok(reports)
    }

    fn report(store: &Store, user_id: Uuid, budget: Budget) -> CoreResult<BudgetReport> {
        let (start, end) = month_bounds(budget.year, budget.month)?;
        let spent: i64 = store
            .transactions_in_range(user_id, start, end)
            .into_iter()
            .filter(|t| t.kind == TransactionKind::Expense && t.category_id == Some(budget.category_id))
            .map(|t| t.amount_cents)
            .sum();
        Ok(BudgetReport::compute(budget, spent))
    }
}
