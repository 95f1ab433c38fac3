//! GitHub credential and repository cache.

use hyokai_storage::{LocalStore, keys};
use hyokai_types::RepoCacheEntry;

/// Locally stored GitHub personal-access token.
///
/// Encryption at rest is the remote account store's concern; locally the
/// token shares the store's fate with every other value.
#[derive(Clone)]
pub struct CredentialStore {
    store: LocalStore,
}

impl CredentialStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Option<String> {
        self.store.read(keys::GITHUB_PAT, None)
    }

    pub fn set(&self, token: &str) {
        self.store.write(keys::GITHUB_PAT, &Some(token));
    }

    pub fn clear(&self) {
        self.store.remove(keys::GITHUB_PAT);
    }

    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }
}

/// Cached listing of the user's accessible repositories.
#[derive(Clone)]
pub struct RepoCacheStore {
    store: LocalStore,
}

impl RepoCacheStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<RepoCacheEntry> {
        self.store.read(keys::REPO_CACHE, Vec::new())
    }

    pub fn replace(&self, repos: &[RepoCacheEntry]) {
        self.store.write(keys::REPO_CACHE, &repos);
    }

    pub fn clear(&self) {
        self.store.remove(keys::REPO_CACHE);
    }
}
