use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Groups transactions for budgeting and reporting. Categories created by
/// the suggester are flagged so the UI can distinguish them from manual ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub auto_generated: bool,
}

impl Category {
    pub fn new(user_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            auto_generated: false,
        }
    }

    pub fn auto(user_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            auto_generated: true,
            ..Self::new(user_id, name)
        }
    }
}
