//! Ledger domain models and the date-driven core computations.

pub mod budget;
pub mod category;
pub mod daily_balance;
pub mod recurring;
pub mod transaction;
pub mod user;

pub use budget::{Budget, BudgetReport, BudgetStatus};
pub use category::Category;
pub use daily_balance::{daily_balances, BalanceStatus, DailyBalanceEntry};
pub use recurring::{Frequency, RecurringDefinition};
pub use transaction::{Transaction, TransactionKind};
pub use user::{Thresholds, User};
