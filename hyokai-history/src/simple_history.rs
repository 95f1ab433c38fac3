//! Simplified history ledger.

use crate::ledger::{Ledger, LedgerRecord};
use hyokai_storage::{LocalStore, keys};
use hyokai_types::{SimpleHistoryEntry, new_entry_id, now_millis};

/// Maximum number of retained simplified history entries.
pub const SIMPLE_HISTORY_CAP: usize = 30;

impl LedgerRecord for SimpleHistoryEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A simplified entry before id and timestamp assignment.
#[derive(Clone, Debug)]
pub struct SimpleHistoryDraft {
    pub input: String,
    pub output: String,
    pub elapsed_time: Option<f64>,
}

/// Append-only ledger of plain input/output pairs, newest-first.
///
/// Fully independent of the primary ledger: its own key, its own cap.
pub struct SimpleHistoryLedger {
    inner: Ledger<SimpleHistoryEntry>,
}

impl SimpleHistoryLedger {
    pub fn new(store: LocalStore) -> Self {
        Self {
            inner: Ledger::new(store, keys::SIMPLE_HISTORY, SIMPLE_HISTORY_CAP),
        }
    }

    pub fn load(&self) -> Vec<SimpleHistoryEntry> {
        self.inner.load()
    }

    pub fn append(&self, draft: SimpleHistoryDraft) -> SimpleHistoryEntry {
        let entry = SimpleHistoryEntry {
            id: new_entry_id(),
            timestamp: now_millis(),
            input: draft.input,
            output: draft.output,
            elapsed_time: draft.elapsed_time,
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
