//! History entry records.

use crate::result::{PromptResult, TaskMode};
use serde::{Deserialize, Serialize};

/// One entry in the primary history ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique, assigned at creation.
    pub id: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// The user's original natural-language request.
    pub input: String,
    pub task_mode: TaskMode,
    pub result: PromptResult,
}

/// One entry in the simplified history ledger.
///
/// Independent of [`HistoryEntry`]: separate storage key, separate cap,
/// never shares entries or ordering state with the primary ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimpleHistoryEntry {
    pub id: String,
    pub timestamp: i64,
    pub input: String,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_time: Option<f64>,
}
