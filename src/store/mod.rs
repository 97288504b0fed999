//! Plain-data aggregate standing in for the relational persistence layer.
//! Services read and mutate it directly; callers own serialization of
//! concurrent access (one request at a time per store).

pub mod persistence;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::{Budget, Category, RecurringDefinition, Transaction, User};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store {
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub recurring: Vec<RecurringDefinition>,
    pub budgets: Vec<Budget>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn add_user(&mut self, user: User) -> Uuid {
        let id = user.id;
        self.users.push(user);
        id
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    pub fn category_by_name(&self, user_id: Uuid, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.user_id == user_id && c.name == name)
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        id
    }

    pub fn remove_category(&mut self, id: Uuid) -> Option<Category> {
        let idx = self.categories.iter().position(|c| c.id == id)?;
        Some(self.categories.remove(idx))
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|t| t.id == id)
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        id
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let idx = self.transactions.iter().position(|t| t.id == id)?;
        Some(self.transactions.remove(idx))
    }

    pub fn transactions_for_user(&self, user_id: Uuid) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(move |t| t.user_id == user_id)
    }

    /// User transactions with dates inside `[start, end]`, both inclusive.
    pub fn transactions_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.user_id == user_id && t.date >= start && t.date <= end)
            .collect()
    }

    pub fn recurring(&self, id: Uuid) -> Option<&RecurringDefinition> {
        self.recurring.iter().find(|r| r.id == id)
    }

    pub fn recurring_mut(&mut self, id: Uuid) -> Option<&mut RecurringDefinition> {
        self.recurring.iter_mut().find(|r| r.id == id)
    }

    pub fn recurring_ids_for_user(&self, user_id: Uuid) -> Vec<Uuid> {
        self.recurring
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.id)
            .collect()
    }

    pub fn add_recurring(&mut self, definition: RecurringDefinition) -> Uuid {
        let id = definition.id;
        self.recurring.push(definition);
        id
    }

    pub fn remove_recurring(&mut self, id: Uuid) -> Option<RecurringDefinition> {
        let idx = self.recurring.iter().position(|r| r.id == id)?;
        Some(self.recurring.remove(idx))
    }

    pub fn budget_mut(
        &mut self,
        user_id: Uuid,
        category_id: Uuid,
        year: i32,
        month: u32,
    ) -> Option<&mut Budget> {
        self.budgets.iter_mut().find(|b| {
            b.user_id == user_id
                && b.category_id == category_id
                && b.year == year
                && b.month == month
        })
    }

    pub fn budgets_for_month(&self, user_id: Uuid, year: i32, month: u32) -> Vec<&Budget> {
        self.budgets
            .iter()
            .filter(|b| b.user_id == user_id && b.year == year && b.month == month)
            .collect()
    }

    pub fn add_budget(&mut self, budget: Budget) -> Uuid {
        let id = budget.id;
        self.budgets.push(budget);
        id
    }
}
