//! Stateless service structs over the [`Store`](crate::store::Store)
//! aggregate. Each associated function validates inputs and ownership, then
//! delegates to the pure ledger computations.

pub mod budget_service;
pub mod category_service;
pub mod insights_service;
pub mod recurring_service;
pub mod transaction_service;
pub mod user_service;

pub use budget_service::{BudgetService, BudgetUpsert};
pub use category_service::{CategoryOrigin, CategoryService};
pub use insights_service::{InsightKind, InsightsService, MonthlyInsights};
pub use recurring_service::{NewRecurring, RecurringService};
pub use transaction_service::{ListFilter, NewTransaction, TransactionPatch, TransactionService};
pub use user_service::UserService;

use crate::errors::CoreError;

pub(crate) fn month_bounds(year: i32, month: u32) -> Result<(chrono::NaiveDate, chrono::NaiveDate), CoreError> {
    use chrono::{Duration, NaiveDate};
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CoreError::Validation(format!("invalid month {year}-{month:02}")))?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // Month is valid here, so the first of the next month always exists.
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap() - Duration::days(1);
    Ok((start, end))
}
