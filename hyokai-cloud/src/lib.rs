//! Remote account sync for Hyokai.
//!
//! Everything that talks to the account API lives here:
//!
//! - [`retry`] — the single retry executor every remote write goes through
//! - [`RemoteStore`] — the upsert-capable account store interface, with
//!   [`HttpRemoteStore`] as the JSON API implementation
//! - [`SessionState`] — explicit session state container and the
//!   first-login signal
//! - [`RemoteMirror`] — best-effort mirroring of local writes while a
//!   session is authenticated
//! - [`MigrationEngine`] — the one-time, idempotent transfer of local
//!   data into the account on first login
//!
//! Local storage stays authoritative throughout; remote writes are upserts
//! so every sequence here is safe to repeat.

mod api_client;
mod config;
mod error;
mod migration;
mod mirror;
mod remote;
pub mod retry;
mod session;

pub use api_client::{AuthTokens, HttpRemoteStore};
pub use config::CloudConfig;
pub use error::{CloudError, CloudResult};
pub use migration::{
    MigrationCategory, MigrationEngine, MigrationPhase, MigrationPreview, MigrationProgress,
    SUCCESS_HOLD,
};
pub use mirror::RemoteMirror;
pub use remote::RemoteStore;
pub use retry::{RetryPolicy, backoff_delay, is_transient_error, with_retry, with_retry_notify};
pub use session::{SessionSnapshot, SessionState};
