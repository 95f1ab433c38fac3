//! Capacity-bounded history ledgers and local preference stores.
//!
//! Two parallel append-only ledgers record user interactions newest-first:
//! the primary history ledger (full transformation results, cap 50) and
//! the simplified ledger (plain input/output pairs, cap 30). Both sit on
//! the quota-aware [`LocalStore`], so trimming under storage pressure
//! always discards the oldest entries first.
//!
//! The same `LocalStore` also backs the preference store, saved contexts,
//! the GitHub credential, and the repository cache — everything the
//! migration step later moves into a signed-in account.
//!
//! [`LocalStore`]: hyokai_storage::LocalStore

mod contexts;
mod github;
mod history;
mod ledger;
mod prefs;
mod simple_history;
mod state;

pub use contexts::ContextStore;
pub use github::{CredentialStore, RepoCacheStore};
pub use history::{HISTORY_CAP, HistoryDraft, HistoryLedger};
pub use ledger::{Ledger, LedgerRecord};
pub use prefs::PreferenceStore;
pub use simple_history::{SIMPLE_HISTORY_CAP, SimpleHistoryDraft, SimpleHistoryLedger};
pub use state::LocalState;
