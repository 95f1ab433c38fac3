//! File-backed store — a single JSON map with atomic replace-on-write.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// Persistent store backed by one JSON file.
///
/// Every mutation serializes the full map, checks it against the
/// configured capacity, writes a sibling temp file, and renames it over
/// the target. The rename is the commit point: a write that fails at any
/// earlier step leaves the previously committed file untouched.
pub struct FileBackend {
    path: PathBuf,
    capacity: u64,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileBackend {
    /// Opens or creates a store at the given path.
    ///
    /// A corrupt or unreadable existing file starts the store empty with a
    /// logged warning rather than failing the open; the file is replaced
    /// on the next successful write.
    pub fn open(path: impl Into<PathBuf>, capacity_bytes: u64) -> StorageResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!("discarding corrupt store file {}: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("store file {} unreadable, starting empty: {e}", path.display());
                BTreeMap::new()
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self {
            path,
            capacity: capacity_bytes,
            entries: Mutex::new(entries),
        })
    }

    /// Serializes `map`, enforces capacity, and commits it via temp file +
    /// rename. The in-memory view is only updated by the caller after this
    /// succeeds.
    fn persist(&self, map: &BTreeMap<String, String>) -> StorageResult<()> {
        let serialized = serde_json::to_string(map)?;
        let size = serialized.len() as u64;
        if size > self.capacity {
            return Err(StorageError::QuotaExceeded {
                needed: size,
                capacity: self.capacity,
            });
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serialized)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let mut candidate = entries.clone();
        candidate.insert(key.to_string(), value.to_string());
        self.persist(&candidate)?;
        *entries = candidate;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().unwrap();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut candidate = entries.clone();
        candidate.remove(key);
        self.persist(&candidate)?;
        *entries = candidate;
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.keys().cloned().collect())
    }
}
