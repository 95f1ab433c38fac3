//! Remote account store interface.

use crate::error::CloudResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hyokai_types::{HistoryEntry, Preferences, RepoCacheEntry, SavedContext, SimpleHistoryEntry};

/// Upsert-capable, account-scoped remote store.
///
/// Every write is an insert-or-update for the authenticated user, so any
/// sequence of calls is safe to repeat — the migration step depends on
/// this to make a retried run non-duplicating. The migration flag is
/// write-once from this layer's perspective: [`mark_migrated`] is
/// first-writer-wins and the flag is never cleared.
///
/// [`mark_migrated`]: RemoteStore::mark_migrated
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn upsert_preferences(&self, prefs: &Preferences) -> CloudResult<()>;

    async fn upsert_saved_contexts(&self, contexts: &[SavedContext]) -> CloudResult<()>;

    async fn upsert_history(&self, entries: &[HistoryEntry]) -> CloudResult<()>;

    async fn upsert_simple_history(&self, entries: &[SimpleHistoryEntry]) -> CloudResult<()>;

    async fn upsert_credential(&self, token: &str) -> CloudResult<()>;

    async fn upsert_repo_cache(&self, repos: &[RepoCacheEntry]) -> CloudResult<()>;

    /// When this account's local data was migrated, if ever.
    async fn migrated_at(&self) -> CloudResult<Option<DateTime<Utc>>>;

    /// Sets the migration flag if unset and returns the authoritative
    /// timestamp; a flag already set by another session wins.
    async fn mark_migrated(&self) -> CloudResult<DateTime<Utc>>;
}
