//! In-memory backend with a byte-capacity ceiling.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::Mutex;

struct Inner {
    entries: HashMap<String, String>,
    used_bytes: u64,
    /// One-shot injected fault message, consumed by the next `set`.
    fail_next_set: Option<String>,
}

/// Capacity-limited in-memory store.
///
/// Accounts key and value bytes against the configured capacity the same
/// way a browser accounts an origin's persistent storage, so quota-trim
/// behavior can be exercised without a real disk.
pub struct MemoryBackend {
    inner: Mutex<Inner>,
    capacity: u64,
}

impl MemoryBackend {
    pub fn new(capacity_bytes: u64) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                used_bytes: 0,
                fail_next_set: None,
            }),
            capacity: capacity_bytes,
        }
    }

    /// Injects a non-quota fault into the next `set` call.
    pub fn fail_next_set(&self, message: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_set = Some(message.to_string());
    }

    /// Bytes currently accounted against the capacity.
    pub fn used_bytes(&self) -> u64 {
        self.inner.lock().unwrap().used_bytes
    }

    fn entry_cost(key: &str, value: &str) -> u64 {
        (key.len() + value.len()) as u64
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(message) = inner.fail_next_set.take() {
            return Err(StorageError::Unavailable(message));
        }

        let old_cost = inner
            .entries
            .get(key)
            .map(|v| Self::entry_cost(key, v))
            .unwrap_or(0);
        let new_cost = Self::entry_cost(key, value);
        let needed = inner.used_bytes - old_cost + new_cost;

        if needed > self.capacity {
            return Err(StorageError::QuotaExceeded {
                needed,
                capacity: self.capacity,
            });
        }

        inner.entries.insert(key.to_string(), value.to_string());
        inner.used_bytes = needed;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(value) = inner.entries.remove(key) {
            inner.used_bytes -= Self::entry_cost(key, &value);
        }
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.entries.keys().cloned().collect())
    }
}
