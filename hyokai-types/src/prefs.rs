//! Preferences, saved contexts, and the repository cache.

use crate::result::TaskMode;
use serde::{Deserialize, Serialize};

/// A reusable block of project context the user saved by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedContext {
    pub id: String,
    pub name: String,
    pub content: String,
    pub created_at: i64,
}

/// One cached GitHub repository the user granted access to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepoCacheEntry {
    pub full_name: String,
    pub default_branch: String,
    #[serde(default)]
    pub private: bool,
}

/// Snapshot of every per-user preference.
///
/// All fields default so a snapshot deserializes from partial data; the
/// session id is auto-generated and therefore excluded from
/// [`Preferences::is_empty`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_mode: Option<TaskMode>,
    #[serde(default)]
    pub beginner_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compare_models: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_context_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Preferences {
    /// True when the user never changed anything worth migrating.
    pub fn is_empty(&self) -> bool {
        self.task_mode.is_none()
            && !self.beginner_mode
            && self.language.is_none()
            && self.model.is_none()
            && self.compare_models.is_empty()
            && self.user_context.is_none()
            && self.active_context_id.is_none()
    }
}
