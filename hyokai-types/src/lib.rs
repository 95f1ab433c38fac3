//! Shared domain types for Hyokai.
//!
//! Everything that crosses a crate boundary lives here: prompt results,
//! history entries, saved contexts, preferences, and entry-id generation.
//! All types are plain serde structs so they serialize identically into
//! local storage and the remote account store.

mod history;
mod id;
mod prefs;
mod result;

pub use history::{HistoryEntry, SimpleHistoryEntry};
pub use id::{new_entry_id, now_millis};
pub use prefs::{Preferences, RepoCacheEntry, SavedContext};
pub use result::{ModelOutput, PromptResult, TaskMode};
