//! Aggregate handle over every locally persisted category.

use crate::contexts::ContextStore;
use crate::github::{CredentialStore, RepoCacheStore};
use crate::history::HistoryLedger;
use crate::prefs::PreferenceStore;
use crate::simple_history::SimpleHistoryLedger;
use hyokai_storage::LocalStore;

/// All local stores, sharing one underlying backend.
///
/// This is the single object the migration step reads its snapshot from,
/// and the seam UI state is injected through instead of free-standing
/// module globals.
pub struct LocalState {
    store: LocalStore,
    pub history: HistoryLedger,
    pub simple_history: SimpleHistoryLedger,
    pub prefs: PreferenceStore,
    pub contexts: ContextStore,
    pub credential: CredentialStore,
    pub repos: RepoCacheStore,
}

impl LocalState {
    pub fn new(store: LocalStore) -> Self {
        Self {
            history: HistoryLedger::new(store.clone()),
            simple_history: SimpleHistoryLedger::new(store.clone()),
            prefs: PreferenceStore::new(store.clone()),
            contexts: ContextStore::new(store.clone()),
            credential: CredentialStore::new(store.clone()),
            repos: RepoCacheStore::new(store.clone()),
            store,
        }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }
}
