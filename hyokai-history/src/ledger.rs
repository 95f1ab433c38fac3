//! Generic newest-first ledger over the local store.

use hyokai_storage::LocalStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// A record that can live in a ledger.
pub trait LedgerRecord: Serialize + DeserializeOwned + Clone {
    fn id(&self) -> &str;
}

/// Ordered, capacity-bounded list of records persisted under one key.
///
/// Entries are kept newest-first; the persisted length never exceeds
/// `cap`, and trimming (whether by cap or by quota pressure) always
/// discards from the tail, i.e. the oldest entries.
pub struct Ledger<T> {
    store: LocalStore,
    key: &'static str,
    cap: usize,
    _record: PhantomData<T>,
}

impl<T: LedgerRecord> Ledger<T> {
    pub fn new(store: LocalStore, key: &'static str, cap: usize) -> Self {
        Self {
            store,
            key,
            cap,
            _record: PhantomData,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Full ordered ledger; empty on absence or any malformed payload.
    pub fn load(&self) -> Vec<T> {
        self.store.read(self.key, Vec::new())
    }

    /// Prepends a record and persists, trimming under the cap and under
    /// quota pressure. Returns the number of records actually persisted.
    pub fn insert(&self, record: T) -> usize {
        let mut entries = self.load();
        entries.insert(0, record);
        self.store
            .write_collection_with_trim(self.key, &entries, self.cap)
    }

    /// Removes the record with the given id; no-op if absent.
    pub fn delete(&self, id: &str) {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|e| e.id() != id);
        if entries.len() != before {
            self.store
                .write_collection_with_trim(self.key, &entries, self.cap);
        }
    }

    /// Removes the whole ledger.
    pub fn clear(&self) {
        self.store.remove(self.key);
    }
}
