use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of money movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A concrete income or expense record, either entered by the user or
/// generated from a recurring definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    /// Amount in integer cents, always positive; `kind` carries the sign.
    pub amount_cents: i64,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub category_id: Option<Uuid>,
    /// Set when this record was materialized from a recurring definition.
    /// Deleting the definition leaves generated records untouched.
    #[serde(default)]
    pub recurring_id: Option<Uuid>,
}

impl Transaction {
    pub fn new(
        user_id: Uuid,
        description: impl Into<String>,
        amount_cents: i64,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            description: description.into(),
            amount_cents,
            kind,
            date,
            category_id: None,
            recurring_id: None,
        }
    }

    /// Signed contribution of this record to a running balance.
    pub fn signed_cents(&self) -> i64 {
        match self.kind {
            TransactionKind::Income => self.amount_cents,
            TransactionKind::Expense => -self.amount_cents,
        }
    }
}
