//! Saved project contexts.

use hyokai_storage::{LocalStore, keys};
use hyokai_types::{SavedContext, new_entry_id, now_millis};

/// Named blocks of project context the user saved for reuse, newest-first.
#[derive(Clone)]
pub struct ContextStore {
    store: LocalStore,
}

impl ContextStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<SavedContext> {
        self.store.read(keys::SAVED_CONTEXTS, Vec::new())
    }

    /// Saves a new context and returns it.
    pub fn save(&self, name: &str, content: &str) -> SavedContext {
        let context = SavedContext {
            id: new_entry_id(),
            name: name.to_string(),
            content: content.to_string(),
            created_at: now_millis(),
        };
        let mut contexts = self.list();
        contexts.insert(0, context.clone());
        self.store.write(keys::SAVED_CONTEXTS, &contexts);
        context
    }

    pub fn delete(&self, id: &str) {
        let mut contexts = self.list();
        let before = contexts.len();
        contexts.retain(|c| c.id != id);
        if contexts.len() != before {
            self.store.write(keys::SAVED_CONTEXTS, &contexts);
        }
    }

    pub fn clear(&self) {
        self.store.remove(keys::SAVED_CONTEXTS);
    }

    /// Replaces the full list (used when reloading remote-backed state).
    pub fn replace(&self, contexts: &[SavedContext]) {
        self.store.write(keys::SAVED_CONTEXTS, &contexts);
    }
}
