use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-user balance classification boundaries, in cents. All three must be
/// present and ordered (`bad <= ok <= good`) to take effect; anything else is
/// treated as unconfigured rather than rejected, since a triple can become
/// inconsistent through partial updates outside this crate's control.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Thresholds {
    pub bad: Option<i64>,
    pub ok: Option<i64>,
    pub good: Option<i64>,
}

impl Thresholds {
    pub fn new(bad: i64, ok: i64, good: i64) -> Self {
        Self {
            bad: Some(bad),
            ok: Some(ok),
            good: Some(good),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.bad.is_some() && self.ok.is_some() && self.good.is_some()
    }

    /// Returns `(bad, ok, good)` only when all three are present and ordered.
    pub fn configured(&self) -> Option<(i64, i64, i64)> {
        match (self.bad, self.ok, self.good) {
            (Some(bad), Some(ok), Some(good)) if bad <= ok && ok <= good => {
                Some((bad, ok, good))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Opt-out switch for the rule-based suggester on this user's records.
    #[serde(default = "default_true")]
    pub auto_categorize_enabled: bool,
    #[serde(default)]
    pub thresholds: Thresholds,
}

fn default_true() -> bool {
    true
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            auto_categorize_enabled: true,
            thresholds: Thresholds::default(),
        }
    }
}
