use uuid::Uuid;

use crate::errors::{CoreError, CoreResult};
use crate::ledger::Category;
use crate::store::Store;

/// Filter for how a category came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryOrigin {
    Auto,
    Manual,
}

pub struct CategoryService;

impl CategoryService {
    pub fn list<'a>(
        store: &'a Store,
        user_id: Uuid,
        origin: Option<CategoryOrigin>,
    ) -> Vec<&'a Category> {
        store
            .categories
            .iter()
            .filter(|c| c.user_id == user_id)
            .filter(|c| match origin {
                None => true,
                Some(CategoryOrigin::Auto) => c.auto_generated,
                Some(CategoryOrigin::Manual) => !c.auto_generated,
            })
            .collect()
    }

    /// Creates a manual category; names are unique per user.
    pub fn create(store: &mut Store, user_id: Uuid, name: &str) -> CoreResult<Uuid> {
        store
            .user(user_id)
            .ok_or(CoreError::UserNotFound(user_id))?;
        if store.category_by_name(user_id, name).is_some() {
            return Err(CoreError::Validation(format!(
                "category '{name}' already exists"
            )));
        }
        Ok(store.add_category(Category::new(user_id, name)))
    }

    pub fn rename(store: &mut Store, user_id: Uuid, id: Uuid, name: &str) -> CoreResult<()> {
        match store.category(id) {
            Some(category) if category.user_id == user_id => {}
            _ => return Err(CoreError::CategoryNotFound(id)),
        }
        if let Some(existing) = store.category_by_name(user_id, name) {
            if existing.id != id {
                return Err(CoreError::Validation(format!(
                    "category '{name}' already exists"
                )));
            }
        }
        // Lookup above guarantees the id is present.
        if let Some(category) = store.category_mut(id) {
            category.name = name.to_string();
        }
        Ok(())
    }

    /// Deletes a category that no transaction references.
    pub fn delete(store: &mut Store, user_id: Uuid, id: Uuid) -> CoreResult<()> {
        match store.category(id) {
            Some(category) if category.user_id == user_id => {}
            _ => return Err(CoreError::CategoryNotFound(id)),
        }
        let in_use = store
            .transactions
            .iter()
            .any(|t| t.category_id == Some(id));
        if in_use {
            return Err(CoreError::Validation(
                "category is referenced by transactions; recategorize them first".into(),
            ));
        }
        store.remove_category(id);
        Ok(())
    }
}
