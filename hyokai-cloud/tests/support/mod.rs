//! In-memory upsert remote store for migration and mirror tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hyokai_cloud::{CloudError, CloudResult, RemoteStore};
use hyokai_types::{HistoryEntry, Preferences, RepoCacheEntry, SavedContext, SimpleHistoryEntry};
use std::collections::HashMap;
use std::sync::Mutex;

/// What the fake account currently holds. Collections are keyed by entry
/// id, so repeated upserts cannot create duplicates — the same contract
/// the real store provides.
#[derive(Default)]
pub struct RemoteData {
    pub prefs: Option<Preferences>,
    pub contexts: HashMap<String, SavedContext>,
    pub history: HashMap<String, HistoryEntry>,
    pub simple_history: HashMap<String, SimpleHistoryEntry>,
    pub credential: Option<String>,
    pub repos: Vec<RepoCacheEntry>,
    pub migrated_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
pub struct MockRemote {
    pub data: Mutex<RemoteData>,
    /// endpoint -> (remaining injected failures, fail as transient).
    faults: Mutex<HashMap<&'static str, (usize, bool)>>,
    calls: Mutex<Vec<&'static str>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `times` calls to `endpoint` fail; transient faults
    /// answer 503, terminal ones a policy rejection.
    pub fn fail(&self, endpoint: &'static str, times: usize, transient: bool) {
        self.faults
            .lock()
            .unwrap()
            .insert(endpoint, (times, transient));
    }

    pub fn calls_for(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == endpoint)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn gate(&self, endpoint: &'static str) -> CloudResult<()> {
        self.calls.lock().unwrap().push(endpoint);
        let mut faults = self.faults.lock().unwrap();
        if let Some((remaining, transient)) = faults.get_mut(endpoint) {
            if *remaining > 0 {
                *remaining = remaining.saturating_sub(1);
                return Err(if *transient {
                    CloudError::Status {
                        code: 503,
                        message: "service unavailable".to_string(),
                    }
                } else {
                    CloudError::Api("permission denied".to_string())
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MockRemote {
    async fn upsert_preferences(&self, prefs: &Preferences) -> CloudResult<()> {
        self.gate("preferences")?;
        self.data.lock().unwrap().prefs = Some(prefs.clone());
        Ok(())
    }

    async fn upsert_saved_contexts(&self, contexts: &[SavedContext]) -> CloudResult<()> {
        self.gate("contexts")?;
        let mut data = self.data.lock().unwrap();
        for context in contexts {
            data.contexts.insert(context.id.clone(), context.clone());
        }
        Ok(())
    }

    async fn upsert_history(&self, entries: &[HistoryEntry]) -> CloudResult<()> {
        self.gate("history")?;
        let mut data = self.data.lock().unwrap();
        for entry in entries {
            data.history.insert(entry.id.clone(), entry.clone());
        }
        Ok(())
    }

    async fn upsert_simple_history(&self, entries: &[SimpleHistoryEntry]) -> CloudResult<()> {
        self.gate("simple_history")?;
        let mut data = self.data.lock().unwrap();
        for entry in entries {
            data.simple_history.insert(entry.id.clone(), entry.clone());
        }
        Ok(())
    }

    async fn upsert_credential(&self, token: &str) -> CloudResult<()> {
        self.gate("credential")?;
        self.data.lock().unwrap().credential = Some(token.to_string());
        Ok(())
    }

    async fn upsert_repo_cache(&self, repos: &[RepoCacheEntry]) -> CloudResult<()> {
        self.gate("repos")?;
        self.data.lock().unwrap().repos = repos.to_vec();
        Ok(())
    }

    async fn migrated_at(&self) -> CloudResult<Option<DateTime<Utc>>> {
        self.gate("migrated_at")?;
        Ok(self.data.lock().unwrap().migrated_at)
    }

    async fn mark_migrated(&self) -> CloudResult<DateTime<Utc>> {
        self.gate("mark_migrated")?;
        let mut data = self.data.lock().unwrap();
        let at = data.migrated_at.get_or_insert_with(Utc::now);
        Ok(*at)
    }
}
