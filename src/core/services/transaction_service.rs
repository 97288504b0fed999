//! Transaction CRUD, rule-based auto-categorization, and the daily balance
//! report.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::categorizer;
use crate::config::Config;
use crate::core::services::month_bounds;
use crate::errors::{CoreError, CoreResult};
use crate::ledger::{daily_balances, Category, DailyBalanceEntry, Transaction, TransactionKind};
use crate::store::Store;

/// Input for a new transaction. Already shape-validated by the caller; the
/// service enforces the business rules.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub amount_cents: i64,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub category_id: Option<Uuid>,
}

/// Partial update. The doubled `Option` on `category_id` distinguishes
/// "leave as is" (`None`) from "clear it" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub description: Option<String>,
    pub amount_cents: Option<i64>,
    pub kind: Option<TransactionKind>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<Option<Uuid>>,
}

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub on_date: Option<NaiveDate>,
    pub category_id: Option<Uuid>,
    pub skip: usize,
    pub limit: Option<usize>,
}

pub struct TransactionService;

impl TransactionService {
    /// Creates a transaction for the user. When no category is supplied and
    /// both the global and per-user switches allow it, the keyword suggester
    /// assigns one, creating the category on first use.
    pub fn create(
        store: &mut Store,
        config: &Config,
        user_id: Uuid,
        data: NewTransaction,
    ) -> CoreResult<Uuid> {
        let user = store
            .user(user_id)
            .ok_or(CoreError::UserNotFound(user_id))?;
        if data.amount_cents <= 0 {
            return Err(CoreError::Validation("amount must be positive".into()));
        }
        if let Some(category_id) = data.category_id {
            Self::check_category(store, user_id, category_id)?;
        }

        let auto_allowed = config.auto_categorize_enabled && user.auto_categorize_enabled;
        let mut txn = Transaction::new(
            user_id,
            data.description,
            data.amount_cents,
            data.kind,
            data.date,
        );
        txn.category_id = data.category_id;
        if txn.category_id.is_none() && auto_allowed {
            txn.category_id = Self::auto_categorize(store, user_id, &txn.description);
        }
        Ok(store.add_transaction(txn))
    }

    pub fn get(store: &Store, user_id: Uuid, id: Uuid) -> CoreResult<&Transaction> {
        let txn = store
            .transaction(id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        if txn.user_id != user_id {
            return Err(CoreError::TransactionNotFound(id));
        }
        Ok(txn)
    }

    /// Lists the user's transactions, newest first, with optional date and
    /// category filters plus skip/limit pagination.
    pub fn list<'a>(store: &'a Store, user_id: Uuid, filter: &ListFilter) -> Vec<&'a Transaction> {
        let mut txns: Vec<&Transaction> = store
            .transactions_for_user(user_id)
            .filter(|t| filter.on_date.map_or(true, |d| t.date == d))
            .filter(|t| {
                filter
                    .category_id
                    .map_or(true, |c| t.category_id == Some(c))
            })
            .collect();
        txns.sort_by(|a, b| b.date.cmp(&a.date));
        txns.into_iter()
            .skip(filter.skip)
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// Applies a partial update. A description change on a still-uncategorized
    /// record re-runs the suggester, unless the patch sets a category itself.
    pub fn update(
        store: &mut Store,
        config: &Config,
        user_id: Uuid,
        id: Uuid,
        patch: TransactionPatch,
    ) -> CoreResult<()> {
        Self::get(store, user_id, id)?;
        let user_allows = store
            .user(user_id)
            .map(|u| u.auto_categorize_enabled)
            .unwrap_or(false);
        if let Some(category_id) = patch.category_id.flatten() {
            Self::check_category(store, user_id, category_id)?;
        }
        if let Some(amount) = patch.amount_cents {
            if amount <= 0 {
                return Err(CoreError::Validation("amount must be positive".into()));
            }
        }

        let currently_uncategorized = store
            .transaction(id)
            .map(|t| t.category_id.is_none())
            .unwrap_or(false);
        let suggested = match (&patch.category_id, &patch.description) {
            (None, Some(description))
                if currently_uncategorized
                    && config.auto_categorize_enabled
                    && user_allows =>
            {
                Self::auto_categorize(store, user_id, description)
            }
            _ => None,
        };

        let txn = store
            .transaction_mut(id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        if let Some(description) = patch.description {
            txn.description = description;
        }
        if let Some(amount) = patch.amount_cents {
            txn.amount_cents = amount;
        }
        if let Some(kind) = patch.kind {
            txn.kind = kind;
        }
        if let Some(date) = patch.date {
            txn.date = date;
        }
        if let Some(category_id) = patch.category_id {
            txn.category_id = category_id;
        } else if let Some(category_id) = suggested {
            txn.category_id = Some(category_id);
        }
        Ok(())
    }

    pub fn delete(store: &mut Store, user_id: Uuid, id: Uuid) -> CoreResult<Transaction> {
        Self::get(store, user_id, id)?;
        store
            .remove_transaction(id)
            .ok_or(CoreError::TransactionNotFound(id))
    }

    /// One entry per calendar day of the month: running balance plus the
    /// color band derived from the user's thresholds.
    pub fn daily_balance(
        store: &Store,
        user_id: Uuid,
        year: i32,
        month: u32,
    ) -> CoreResult<Vec<DailyBalanceEntry>> {
        let user = store
            .user(user_id)
            .ok_or(CoreError::UserNotFound(user_id))?;
        let (start, end) = month_bounds(year, month)?;
        let month_txns: Vec<Transaction> = store
            .transactions_in_range(user_id, start, end)
            .into_iter()
            .cloned()
            .collect();
        Ok(daily_balances(year, month, &month_txns, user.thresholds))
    }

    fn check_category(store: &Store, user_id: Uuid, category_id: Uuid) -> CoreResult<()> {
        match store.category(category_id) {
            Some(category) if category.user_id == user_id => Ok(()),
            _ => Err(CoreError::CategoryNotFound(category_id)),
        }
    }

    /// Runs the suggester and resolves the suggested name to the user's
    /// category, creating an auto-generated one when it does not exist yet.
    fn auto_categorize(store: &mut Store, user_id: Uuid, description: &str) -> Option<Uuid> {
        let name = categorizer::suggest(description)?;
        if let Some(existing) = store.category_by_name(user_id, name) {
            return Some(existing.id);
        }
        let id = store.add_category(Category::auto(user_id, name));
        tracing::debug!(category = name, "auto-created category from suggestion");
        Some(id)
    }
}
