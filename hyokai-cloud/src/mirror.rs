//! Best-effort remote mirroring of local writes.
//!
//! While a session is authenticated, local writes are mirrored into the
//! account store. The local store stays authoritative: a mirror failure
//! is logged and swallowed, and no ordering guarantee exists between the
//! local value and its remote copy.

use crate::error::CloudResult;
use crate::remote::RemoteStore;
use crate::retry::{RetryPolicy, is_transient_error, with_retry};
use crate::session::SessionSnapshot;
use hyokai_types::{HistoryEntry, Preferences, RepoCacheEntry, SavedContext, SimpleHistoryEntry};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Mirrors local writes to the remote store while authenticated.
pub struct RemoteMirror {
    remote: Arc<dyn RemoteStore>,
    retry: RetryPolicy,
    session: watch::Receiver<SessionSnapshot>,
}

impl RemoteMirror {
    pub fn new(
        remote: Arc<dyn RemoteStore>,
        retry: RetryPolicy,
        session: watch::Receiver<SessionSnapshot>,
    ) -> Self {
        Self {
            remote,
            retry,
            session,
        }
    }

    pub async fn mirror_preferences(&self, prefs: &Preferences) {
        self.push("preferences", || self.remote.upsert_preferences(prefs))
            .await;
    }

    pub async fn mirror_contexts(&self, contexts: &[SavedContext]) {
        self.push("saved contexts", || {
            self.remote.upsert_saved_contexts(contexts)
        })
        .await;
    }

    pub async fn mirror_history(&self, entries: &[HistoryEntry]) {
        self.push("history", || self.remote.upsert_history(entries))
            .await;
    }

    pub async fn mirror_simple_history(&self, entries: &[SimpleHistoryEntry]) {
        self.push("simple history", || {
            self.remote.upsert_simple_history(entries)
        })
        .await;
    }

    pub async fn mirror_repo_cache(&self, repos: &[RepoCacheEntry]) {
        self.push("repo cache", || self.remote.upsert_repo_cache(repos))
            .await;
    }

    /// Attempts the upsert once; a transient failure gets the full retry
    /// budget, anything else fails fast. Either way the outcome is only
    /// logged.
    async fn push<F, Fut>(&self, category: &str, mut op: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CloudResult<()>>,
    {
        if !self.session.borrow().authenticated {
            debug!("not authenticated, skipping {category} mirror");
            return;
        }

        match op().await {
            Ok(()) => debug!("mirrored {category}"),
            Err(e) if is_transient_error(&e) => {
                if let Err(e) = with_retry(&self.retry, op).await {
                    warn!("mirroring {category} failed after retries: {e}");
                }
            }
            Err(e) => warn!("mirroring {category} failed: {e}"),
        }
    }
}
