//! Recurring definition CRUD and the materialization pass that turns due
//! occurrences into concrete transactions.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::{CoreError, CoreResult};
use crate::ledger::{Frequency, RecurringDefinition, TransactionKind};
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct NewRecurring {
    pub description: String,
    pub amount_cents: i64,
    pub kind: TransactionKind,
    pub frequency: Frequency,
    pub interval: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub weekday: Option<u32>,
    pub day_of_month: Option<u32>,
    pub category_id: Option<Uuid>,
}

pub struct RecurringService;

impl RecurringService {
    /// Validates and stores a definition. The materialization cursor starts
    /// at `start_date`.
    pub fn create(store: &mut Store, user_id: Uuid, data: NewRecurring) -> CoreResult<Uuid> {
        store
            .user(user_id)
            .ok_or(CoreError::UserNotFound(user_id))?;
        if let Some(category_id) = data.category_id {
            match store.category(category_id) {
                Some(category) if category.user_id == user_id => {}
                _ => return Err(CoreError::CategoryNotFound(category_id)),
            }
        }
        let mut definition = RecurringDefinition::new(
            user_id,
            data.description,
            data.amount_cents,
            data.kind,
            data.frequency,
            data.interval,
            data.start_date,
        );
        definition.end_date = data.end_date;
        definition.weekday = data.weekday;
        definition.day_of_month = data.day_of_month;
        definition.category_id = data.category_id;
        definition.validate()?;
        Ok(store.add_recurring(definition))
    }

    pub fn list<'a>(store: &'a Store, user_id: Uuid) -> Vec<&'a RecurringDefinition> {
        store
            .recurring
            .iter()
            .filter(|r| r.user_id == user_id)
            .collect()
    }

    /// Deletes a definition. Transactions it already generated stay in
    /// place; only future materializations stop.
    pub fn delete(store: &mut Store, user_id: Uuid, id: Uuid) -> CoreResult<()> {
        match store.recurring(id) {
            Some(definition) if definition.user_id == user_id => {}
            _ => return Err(CoreError::RecurringNotFound(id)),
        }
        store.remove_recurring(id);
        Ok(())
    }

    /// Materializes every definition of the user up to `up_to`, inserting
    /// the generated transactions and persisting each advanced cursor.
    /// Returns the number of transactions created.
    pub fn materialize_up_to(store: &mut Store, user_id: Uuid, up_to: NaiveDate) -> CoreResult<usize> {
        store
            .user(user_id)
            .ok_or(CoreError::UserNotFound(user_id))?;
        let ids = store.recurring_ids_for_user(user_id);
        let mut created = 0usize;
        for id in ids {
            let generated = match store.recurring_mut(id) {
                Some(definition) => definition.materialize(up_to),
                None => continue,
            };
            created += generated.len();
            for txn in generated {
                store.add_transaction(txn);
            }
        }
        tracing::debug!(user = %user_id, %up_to, created, "materialized recurring transactions");
        Ok(created)
    }
}
