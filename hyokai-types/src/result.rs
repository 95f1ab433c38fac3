//! Task modes and prompt transformation results.

use serde::{Deserialize, Serialize};

/// Which kind of prompt the user asked to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskMode {
    Coding,
    Prompting,
}

impl Default for TaskMode {
    fn default() -> Self {
        TaskMode::Coding
    }
}

/// Output from a single downstream model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    pub model: String,
    pub output: String,
    /// Wall-clock generation time, when measured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
}

/// Result of one transformation request.
///
/// Tagged so that every consumption site matches exhaustively; adding a
/// third shape is a compile-time-checked change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PromptResult {
    /// One model produced one structured prompt.
    Single {
        model: String,
        output: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        elapsed_ms: Option<u64>,
    },
    /// Several models ran side by side for comparison.
    Compare { outputs: Vec<ModelOutput> },
}

impl PromptResult {
    /// Number of model outputs contained in this result.
    pub fn output_count(&self) -> usize {
        match self {
            PromptResult::Single { .. } => 1,
            PromptResult::Compare { outputs } => outputs.len(),
        }
    }
}
