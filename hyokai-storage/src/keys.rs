//! Storage key names.
//!
//! Every key is namespaced under a common prefix. These names are part of
//! the on-disk contract: any compatible persistence layer must preserve
//! them.

/// Common namespace prefix for all Hyokai keys.
pub const PREFIX: &str = "hyokai:";

/// Primary history ledger.
pub const HISTORY: &str = "hyokai:history";
/// Simplified history ledger.
pub const SIMPLE_HISTORY: &str = "hyokai:simple-history";

// Preference keys.
pub const TASK_MODE: &str = "hyokai:mode";
pub const BEGINNER_MODE: &str = "hyokai:beginner-mode";
pub const LANGUAGE: &str = "hyokai:language";
pub const MODEL: &str = "hyokai:model";
pub const COMPARE_MODELS: &str = "hyokai:compare-models";
pub const USER_CONTEXT: &str = "hyokai:user-context";
pub const SAVED_CONTEXTS: &str = "hyokai:saved-contexts";
pub const ACTIVE_CONTEXT: &str = "hyokai:active-context";
pub const SESSION_ID: &str = "hyokai:session-id";

/// GitHub personal-access token.
pub const GITHUB_PAT: &str = "hyokai:github-pat";
/// Cached repository listing.
pub const REPO_CACHE: &str = "hyokai:repos";

/// Disposable key used by the availability probe.
pub(crate) const AVAILABILITY_PROBE: &str = "hyokai:__probe__";
