//! Account session state.
//!
//! One owned container for everything that used to be ambient flags:
//! whether a session is authenticated, whose account it is, whether the
//! migration check already ran this session, and whether remote-backed
//! state has been loaded. All fields reset on sign-out. Observers get a
//! watch channel instead of a global event bus.

use tokio::sync::watch;

/// Broadcast view of the session, for subscribers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub user_id: Option<String>,
}

/// Explicit session state container.
pub struct SessionState {
    authenticated: bool,
    user_id: Option<String>,
    /// Migration check already ran this session (set even when the check
    /// decides not to show anything, so simultaneous triggers cannot
    /// double-run it).
    migration_handled: bool,
    /// Remote-backed state has been loaded at least once this session.
    remote_loaded: bool,
    events: watch::Sender<SessionSnapshot>,
}

impl SessionState {
    pub fn new() -> Self {
        let (events, _) = watch::channel(SessionSnapshot::default());
        Self {
            authenticated: false,
            user_id: None,
            migration_handled: false,
            remote_loaded: false,
            events,
        }
    }

    /// Subscribe to session transitions. Receivers always observe the
    /// latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.events.subscribe()
    }

    /// Marks the session authenticated. Returns true when this call is
    /// the sign-in transition (the one-shot first-login signal consumers
    /// gate on).
    pub fn sign_in(&mut self, user_id: &str) -> bool {
        let first = !self.authenticated;
        self.authenticated = true;
        self.user_id = Some(user_id.to_string());
        self.broadcast();
        first
    }

    /// Resets every field.
    pub fn sign_out(&mut self) {
        self.authenticated = false;
        self.user_id = None;
        self.migration_handled = false;
        self.remote_loaded = false;
        self.broadcast();
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Claims the per-session migration gate. Returns false if some other
    /// trigger already claimed it.
    pub fn claim_migration_check(&mut self) -> bool {
        if self.migration_handled {
            return false;
        }
        self.migration_handled = true;
        true
    }

    pub fn migration_handled(&self) -> bool {
        self.migration_handled
    }

    pub fn mark_remote_loaded(&mut self) {
        self.remote_loaded = true;
    }

    pub fn remote_loaded(&self) -> bool {
        self.remote_loaded
    }

    fn broadcast(&self) {
        let _ = self.events.send(SessionSnapshot {
            authenticated: self.authenticated,
            user_id: self.user_id.clone(),
        });
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
