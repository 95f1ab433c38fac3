//! Typed accessors for per-user preferences.

use hyokai_storage::{LocalStore, keys};
use hyokai_types::{Preferences, TaskMode};

/// Preference reads and writes over the local store.
///
/// Each preference lives under its own key so a quota trim of one value
/// never disturbs the others. Reads fall back to defaults on any fault.
#[derive(Clone)]
pub struct PreferenceStore {
    store: LocalStore,
}

impl PreferenceStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn task_mode(&self) -> Option<TaskMode> {
        self.store.read(keys::TASK_MODE, None)
    }

    pub fn set_task_mode(&self, mode: TaskMode) {
        self.store.write(keys::TASK_MODE, &Some(mode));
    }

    pub fn beginner_mode(&self) -> bool {
        self.store.read(keys::BEGINNER_MODE, false)
    }

    pub fn set_beginner_mode(&self, enabled: bool) {
        self.store.write(keys::BEGINNER_MODE, &enabled);
    }

    pub fn language(&self) -> Option<String> {
        self.store.read(keys::LANGUAGE, None)
    }

    pub fn set_language(&self, language: &str) {
        self.store.write(keys::LANGUAGE, &Some(language));
    }

    pub fn model(&self) -> Option<String> {
        self.store.read(keys::MODEL, None)
    }

    pub fn set_model(&self, model: &str) {
        self.store.write(keys::MODEL, &Some(model));
    }

    pub fn compare_models(&self) -> Vec<String> {
        self.store.read(keys::COMPARE_MODELS, Vec::new())
    }

    pub fn set_compare_models(&self, models: &[String]) {
        self.store.write(keys::COMPARE_MODELS, &models);
    }

    pub fn user_context(&self) -> Option<String> {
        self.store.read(keys::USER_CONTEXT, None)
    }

    pub fn set_user_context(&self, context: &str) {
        self.store.write(keys::USER_CONTEXT, &Some(context));
    }

    pub fn clear_user_context(&self) {
        self.store.remove(keys::USER_CONTEXT);
    }

    pub fn active_context_id(&self) -> Option<String> {
        self.store.read(keys::ACTIVE_CONTEXT, None)
    }

    pub fn set_active_context_id(&self, id: &str) {
        self.store.write(keys::ACTIVE_CONTEXT, &Some(id));
    }

    pub fn clear_active_context(&self) {
        self.store.remove(keys::ACTIVE_CONTEXT);
    }

    /// Stable per-install session id, created on first access.
    pub fn session_id(&self) -> String {
        if let Some(id) = self.store.read::<Option<String>>(keys::SESSION_ID, None) {
            return id;
        }
        let id = uuid::Uuid::new_v4().to_string();
        self.store.write(keys::SESSION_ID, &Some(id.clone()));
        id
    }

    /// Snapshot of everything currently set. Does not create a session id
    /// as a side effect — an auto-generated session id alone is not user
    /// data.
    pub fn snapshot(&self) -> Preferences {
        Preferences {
            task_mode: self.task_mode(),
            beginner_mode: self.beginner_mode(),
            language: self.language(),
            model: self.model(),
            compare_models: self.compare_models(),
            user_context: self.user_context(),
            active_context_id: self.active_context_id(),
            session_id: self.store.read(keys::SESSION_ID, None),
        }
    }

    /// Writes every set field of `prefs` back to the local store (used
    /// when reloading remote-backed state).
    pub fn replace(&self, prefs: &Preferences) {
        if let Some(mode) = prefs.task_mode {
            self.set_task_mode(mode);
        }
        self.set_beginner_mode(prefs.beginner_mode);
        if let Some(ref language) = prefs.language {
            self.set_language(language);
        }
        if let Some(ref model) = prefs.model {
            self.set_model(model);
        }
        if !prefs.compare_models.is_empty() {
            self.set_compare_models(&prefs.compare_models);
        }
        if let Some(ref context) = prefs.user_context {
            self.set_user_context(context);
        }
        if let Some(ref id) = prefs.active_context_id {
            self.set_active_context_id(id);
        }
    }
}
