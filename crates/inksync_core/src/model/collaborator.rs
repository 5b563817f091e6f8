//! Collaborator roster shown in the sidebar.
//!
//! Presentational only: the roster is static, never persisted and never
//! mutated by the store.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    pub id: String,
    pub name: String,
    /// Image reference for the avatar.
    pub avatar: String,
    pub is_online: bool,
}

impl Collaborator {
    fn online(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            avatar: format!("https://api.dicebear.com/7.x/adventurer/svg?seed={name}"),
            is_online: true,
        }
    }
}

/// Returns the fixed "Live Now" roster.
pub fn default_collaborators() -> Vec<Collaborator> {
    vec![
        Collaborator::online("u1", "Mochi"),
        Collaborator::online("u2", "Luna"),
    ]
}
