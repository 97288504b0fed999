//! User registration, profile, and threshold preferences.

use uuid::Uuid;

use crate::errors::{CoreError, CoreResult};
use crate::ledger::{Thresholds, User};
use crate::store::Store;

pub struct UserService;

impl UserService {
    /// Registers a user; emails are unique.
    pub fn register(store: &mut Store, name: &str, email: &str) -> CoreResult<Uuid> {
        if store.user_by_email(email).is_some() {
            return Err(CoreError::Validation(format!(
                "email '{email}' is already registered"
            )));
        }
        Ok(store.add_user(User::new(name, email)))
    }

    pub fn get(store: &Store, user_id: Uuid) -> CoreResult<&User> {
        store.user(user_id).ok_or(CoreError::UserNotFound(user_id))
    }

    pub fn update_profile(
        store: &mut Store,
        user_id: Uuid,
        name: Option<&str>,
        auto_categorize_enabled: Option<bool>,
    ) -> CoreResult<()> {
        let user = store
            .user_mut(user_id)
            .ok_or(CoreError::UserNotFound(user_id))?;
        if let Some(name) = name {
            user.name = name.to_string();
        }
        if let Some(enabled) = auto_categorize_enabled {
            user.auto_categorize_enabled = enabled;
        }
        Ok(())
    }

    pub fn preferences(store: &Store, user_id: Uuid) -> CoreResult<Thresholds> {
        Ok(Self::get(store, user_id)?.thresholds)
    }

    /// First-time threshold configuration: all three values at once, in
    /// non-decreasing order.
    pub fn init_preferences(
        store: &mut Store,
        user_id: Uuid,
        bad: i64,
        ok: i64,
        good: i64,
    ) -> CoreResult<Thresholds> {
        let user = store
            .user_mut(user_id)
            .ok_or(CoreError::UserNotFound(user_id))?;
        if user.thresholds.is_configured() {
            return Err(CoreError::Validation(
                "preferences already configured; use update instead".into(),
            ));
        }
        let thresholds = Thresholds::new(bad, ok, good);
        if thresholds.configured().is_none() {
            return Err(CoreError::Validation(
                "thresholds must satisfy bad <= ok <= good".into(),
            ));
        }
        user.thresholds = thresholds;
        Ok(thresholds)
    }

    /// Partial threshold update, only allowed after the initial
    /// configuration. The merged triple must stay ordered.
    pub fn update_preferences(
        store: &mut Store,
        user_id: Uuid,
        bad: Option<i64>,
        ok: Option<i64>,
        good: Option<i64>,
    ) -> CoreResult<Thresholds> {
        let user = store
            .user_mut(user_id)
            .ok_or(CoreError::UserNotFound(user_id))?;
        if !user.thresholds.is_configured() {
            return Err(CoreError::Validation(
                "preferences not configured yet; initialize them first".into(),
            ));
        }
        let merged = Thresholds {
            bad: bad.or(user.thresholds.bad),
            ok: ok.or(user.thresholds.ok),
            good: good.or(user.thresholds.good),
        };
        if merged.configured().is_none() {
            return Err(CoreError::Validation(
                "thresholds must satisfy bad <= ok <= good".into(),
            ));
        }
        user.thresholds = merged;
        Ok(merged)
    }
}
