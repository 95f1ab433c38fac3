//! Safe wrapper over a storage backend.
//!
//! `LocalStore` is the only surface the rest of the workspace talks to.
//! Writes are classified instead of thrown, collection writes trim
//! oldest-first under quota pressure, and reads fall back to a default on
//! any fault, so storage problems degrade the session instead of crashing
//! it.

use crate::backend::StorageBackend;
use crate::error::StorageError;
use crate::keys;
use crate::memory_backend::MemoryBackend;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

/// Outcome classification for a single write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteStatus {
    /// Value committed.
    Ok,
    /// Backend capacity exhausted; nothing was committed.
    QuotaExceeded,
    /// Any other fault (storage disabled, serialization failure).
    Failed,
}

impl WriteStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, WriteStatus::Ok)
    }
}

/// Quota-aware durable key-value store.
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn StorageBackend>,
}

impl LocalStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// In-memory store with the default capacity (for tests and ephemeral
    /// sessions).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new(crate::DEFAULT_CAPACITY_BYTES)))
    }

    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Persists `value` under `key`, classifying any fault instead of
    /// propagating it.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> WriteStatus {
        let serialized = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(e) => {
                warn!("failed to serialize value for {key}: {e}");
                return WriteStatus::Failed;
            }
        };
        match self.backend.set(key, &serialized) {
            Ok(()) => WriteStatus::Ok,
            Err(e) if e.is_quota() => {
                warn!("quota exceeded writing {key}: {e}");
                WriteStatus::QuotaExceeded
            }
            Err(e) => {
                warn!("storage write failed for {key}: {e}");
                WriteStatus::Failed
            }
        }
    }

    /// Persists a newest-first collection, trimming oldest entries until
    /// it fits.
    ///
    /// The collection is first truncated to `max_entries` (keeping the
    /// head). On a quota fault the last element is dropped and the write
    /// retried, down to the empty collection; removed elements are never
    /// re-inserted. Returns the number of items actually persisted. If
    /// even the empty collection cannot be written the loss is logged and
    /// zero is returned — the caller's in-memory value stays authoritative
    /// for the session.
    pub fn write_collection_with_trim<T: Serialize>(
        &self,
        key: &str,
        items: &[T],
        max_entries: usize,
    ) -> usize {
        let capped = items.len().min(max_entries);
        let mut len = capped;

        loop {
            let serialized = match serde_json::to_string(&items[..len]) {
                Ok(s) => s,
                Err(e) => {
                    warn!("failed to serialize collection for {key}: {e}");
                    return 0;
                }
            };

            match self.backend.set(key, &serialized) {
                Ok(()) => {
                    if len < capped {
                        warn!("trimmed collection {key} from {capped} to {len} entries to fit quota");
                    }
                    return len;
                }
                Err(StorageError::QuotaExceeded { .. }) if len > 0 => {
                    len -= 1;
                }
                Err(e) => {
                    warn!("dropping collection write for {key}: {e}");
                    return 0;
                }
            }
        }
    }

    /// Reads the value under `key`, or `default` on absence or any
    /// read/parse fault.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                warn!("storage read failed for {key}: {e}");
                return default;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("malformed value under {key}, using default: {e}");
                default
            }
        }
    }

    /// Best-effort delete.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            warn!("storage remove failed for {key}: {e}");
        }
    }

    /// Probes writability with a disposable write/remove cycle.
    pub fn is_available(&self) -> bool {
        match self.backend.set(keys::AVAILABILITY_PROBE, "1") {
            Ok(()) => {
                let _ = self.backend.remove(keys::AVAILABILITY_PROBE);
                true
            }
            Err(_) => false,
        }
    }
}
