//! Primary history ledger.

use crate::ledger::{Ledger, LedgerRecord};
use hyokai_storage::{LocalStore, keys};
use hyokai_types::{HistoryEntry, PromptResult, TaskMode, new_entry_id, now_millis};

/// Maximum number of retained primary history entries.
pub const HISTORY_CAP: usize = 50;

impl LedgerRecord for HistoryEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A history entry before id and timestamp assignment.
#[derive(Clone, Debug)]
pub struct HistoryDraft {
    pub input: String,
    pub task_mode: TaskMode,
    pub result: PromptResult,
}

/// Append-only ledger of full transformation results, newest-first.
pub struct HistoryLedger {
    inner: Ledger<HistoryEntry>,
}

impl HistoryLedger {
    pub fn new(store: LocalStore) -> Self {
        Self {
            inner: Ledger::new(store, keys::HISTORY, HISTORY_CAP),
        }
    }

    pub fn load(&self) -> Vec<HistoryEntry> {
        self.inner.load()
    }

    /// Assigns a fresh id and timestamp, prepends, persists, and returns
    /// the constructed entry.
    pub fn append(&self, draft: HistoryDraft) -> HistoryEntry {
        let entry = HistoryEntry {
            id: new_entry_id(),
            timestamp: now_millis(),
            input: draft.input,
            task_mode: draft.task_mode,
            result: draft.result,
        };
        self.inner.insert(entry.clone());
        entry
    }

    pub fn delete(&self, id: &str) {
        self.inner.delete(id);
    }

    pub fn clear(&self) {
        self.inner.clear();
    }
}
