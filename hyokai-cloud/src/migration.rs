//! One-time migration of local data into the account store.
//!
//! Runs on first authenticated login: reads every locally persisted
//! category, pushes each to the remote store through the retry executor,
//! and flags the account so the transfer never re-runs. Categories are
//! pushed independently — a failure partway leaves earlier categories in
//! place, and because every remote write is an upsert, a retried run does
//! not duplicate them. Local data is never deleted or flagged migrated on
//! failure.

use crate::error::{CloudError, CloudResult};
use crate::remote::RemoteStore;
use crate::retry::{RetryPolicy, with_retry};
use crate::session::SessionState;
use hyokai_history::LocalState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// How long the success state is displayed before the caller reloads
/// remote-backed state.
pub const SUCCESS_HOLD: Duration = Duration::from_millis(1500);

/// Read-only count of what a migration would transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MigrationPreview {
    pub saved_contexts: usize,
    pub history_entries: usize,
    pub simple_history_entries: usize,
    pub has_github_pat: bool,
    pub repo_count: usize,
    pub has_preferences: bool,
}

impl MigrationPreview {
    /// Snapshot of the current local stores. Derived, never persisted.
    pub fn of(local: &LocalState) -> Self {
        Self {
            saved_contexts: local.contexts.list().len(),
            history_entries: local.history.load().len(),
            simple_history_entries: local.simple_history.load().len(),
            has_github_pat: local.credential.is_present(),
            repo_count: local.repos.list().len(),
            has_preferences: !local.prefs.snapshot().is_empty(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.saved_contexts > 0
            || self.history_entries > 0
            || self.simple_history_entries > 0
            || self.has_github_pat
            || self.repo_count > 0
            || self.has_preferences
    }
}

/// Migration lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MigrationPhase {
    Idle,
    /// Awaiting user confirmation over a computed preview.
    Preview,
    /// Pushing categories; closing is refused in this phase.
    Migrating,
    Success,
    Error(String),
}

/// The categories pushed during migration, in push order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MigrationCategory {
    Preferences,
    SavedContexts,
    History,
    SimpleHistory,
    Credential,
    RepoCache,
}

impl MigrationCategory {
    pub fn label(&self) -> &'static str {
        match self {
            MigrationCategory::Preferences => "preferences",
            MigrationCategory::SavedContexts => "saved contexts",
            MigrationCategory::History => "history",
            MigrationCategory::SimpleHistory => "simple history",
            MigrationCategory::Credential => "credential",
            MigrationCategory::RepoCache => "repo cache",
        }
    }
}

const CATEGORIES: [MigrationCategory; 6] = [
    MigrationCategory::Preferences,
    MigrationCategory::SavedContexts,
    MigrationCategory::History,
    MigrationCategory::SimpleHistory,
    MigrationCategory::Credential,
    MigrationCategory::RepoCache,
];

/// Progress report emitted after each category completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MigrationProgress {
    pub category: MigrationCategory,
    /// Cumulative completion, 0–100.
    pub percent: u8,
}

/// Drives the migration state machine.
pub struct MigrationEngine {
    remote: Arc<dyn RemoteStore>,
    retry: RetryPolicy,
    phase: MigrationPhase,
    progress_tx: Option<mpsc::Sender<MigrationProgress>>,
}

impl MigrationEngine {
    pub fn new(remote: Arc<dyn RemoteStore>, retry: RetryPolicy) -> Self {
        Self {
            remote,
            retry,
            phase: MigrationPhase::Idle,
            progress_tx: None,
        }
    }

    /// Attaches a progress channel for the migration dialog.
    pub fn with_progress(mut self, tx: mpsc::Sender<MigrationProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn phase(&self) -> &MigrationPhase {
        &self.phase
    }

    /// First-login check. Claims the per-session gate, consults the remote
    /// migration flag, and arms the preview when local data exists.
    ///
    /// Returns the preview to confirm, or `None` when nothing should be
    /// shown: the session is unauthenticated, the check already ran this
    /// session, or the account is already migrated. An account with no
    /// local data is flagged migrated immediately so the check
    /// self-extinguishes.
    pub async fn maybe_begin(
        &mut self,
        session: &mut SessionState,
        local: &LocalState,
    ) -> CloudResult<Option<MigrationPreview>> {
        if !session.is_authenticated() {
            return Ok(None);
        }
        if !session.claim_migration_check() {
            debug!("migration check already handled this session");
            return Ok(None);
        }

        let migrated = with_retry(&self.retry, || self.remote.migrated_at()).await?;
        if let Some(at) = migrated {
            debug!("account already migrated at {at}");
            return Ok(None);
        }

        let preview = MigrationPreview::of(local);
        if !preview.has_data() {
            if let Err(e) = with_retry(&self.retry, || self.remote.mark_migrated()).await {
                warn!("failed to flag empty account as migrated: {e}");
            }
            return Ok(None);
        }

        info!("local data found on first login: {preview:?}");
        self.phase = MigrationPhase::Preview;
        Ok(Some(preview))
    }

    /// Pushes every category to the remote store. Call after the user
    /// confirms the preview.
    ///
    /// On success the account is flagged migrated and the caller should
    /// reload remote-backed state after [`SUCCESS_HOLD`]. On failure the
    /// engine lands in [`MigrationPhase::Error`]; [`retry`] re-arms the
    /// full sequence, which upserts make non-duplicating.
    ///
    /// [`retry`]: MigrationEngine::retry
    pub async fn run(&mut self, local: &LocalState) -> CloudResult<()> {
        if self.phase != MigrationPhase::Preview {
            return Err(CloudError::Api(
                "migration is not awaiting confirmation".to_string(),
            ));
        }
        self.phase = MigrationPhase::Migrating;
        info!("starting local data migration");

        for (i, category) in CATEGORIES.into_iter().enumerate() {
            if let Err(e) = self.push_category(category, local).await {
                warn!("migration failed while pushing {}: {e}", category.label());
                self.phase = MigrationPhase::Error(e.to_string());
                return Err(e);
            }
            let percent = (((i + 1) * 100) / CATEGORIES.len()) as u8;
            self.report(category, percent).await;
        }

        let migrated_at = match with_retry(&self.retry, || self.remote.mark_migrated()).await {
            Ok(at) => at,
            Err(e) => {
                warn!("migration pushed all categories but flagging failed: {e}");
                self.phase = MigrationPhase::Error(e.to_string());
                return Err(e);
            }
        };

        info!("migration complete, account flagged at {migrated_at}");
        self.phase = MigrationPhase::Success;
        Ok(())
    }

    /// Dismisses the preview or error state without flagging the account;
    /// the dialog can come back on a future session. Returns false while
    /// migrating — closing mid-transfer is refused.
    pub fn skip(&mut self) -> bool {
        match self.phase {
            MigrationPhase::Preview | MigrationPhase::Error(_) => {
                self.phase = MigrationPhase::Idle;
                true
            }
            _ => false,
        }
    }

    /// Re-arms a failed migration for another full run.
    pub fn retry(&mut self) -> bool {
        if matches!(self.phase, MigrationPhase::Error(_)) {
            self.phase = MigrationPhase::Preview;
            return true;
        }
        false
    }

    /// Acknowledges the success state after the display hold.
    pub fn complete(&mut self) -> bool {
        if self.phase == MigrationPhase::Success {
            self.phase = MigrationPhase::Idle;
            return true;
        }
        false
    }

    /// False only while migrating: a page reload mid-transfer is unsafe.
    pub fn can_close(&self) -> bool {
        self.phase != MigrationPhase::Migrating
    }

    /// Pushes one category through the retry executor. Empty categories
    /// succeed without a remote call.
    async fn push_category(
        &self,
        category: MigrationCategory,
        local: &LocalState,
    ) -> CloudResult<()> {
        match category {
            MigrationCategory::Preferences => {
                let prefs = local.prefs.snapshot();
                if prefs.is_empty() {
                    return Ok(());
                }
                with_retry(&self.retry, || self.remote.upsert_preferences(&prefs)).await
            }
            MigrationCategory::SavedContexts => {
                let contexts = local.contexts.list();
                if contexts.is_empty() {
                    return Ok(());
                }
                with_retry(&self.retry, || self.remote.upsert_saved_contexts(&contexts)).await
            }
            MigrationCategory::History => {
                let entries = local.history.load();
                if entries.is_empty() {
                    return Ok(());
                }
                with_retry(&self.retry, || self.remote.upsert_history(&entries)).await
            }
            MigrationCategory::SimpleHistory => {
                let entries = local.simple_history.load();
                if entries.is_empty() {
                    return Ok(());
                }
                with_retry(&self.retry, || self.remote.upsert_simple_history(&entries)).await
            }
            MigrationCategory::Credential => match local.credential.get() {
                None => Ok(()),
                Some(token) => {
                    with_retry(&self.retry, || self.remote.upsert_credential(&token)).await
                }
            },
            MigrationCategory::RepoCache => {
                let repos = local.repos.list();
                if repos.is_empty() {
                    return Ok(());
                }
                with_retry(&self.retry, || self.remote.upsert_repo_cache(&repos)).await
            }
        }
    }

    async fn report(&self, category: MigrationCategory, percent: u8) {
        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(MigrationProgress { category, percent }).await;
        }
    }
}
