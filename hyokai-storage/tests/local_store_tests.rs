use hyokai_storage::{LocalStore, MemoryBackend, StorageBackend, WriteStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Note {
    id: u32,
    body: String,
}

fn note(id: u32) -> Note {
    Note {
        id,
        body: format!("note-{id}"),
    }
}

fn store_with_capacity(capacity: u64) -> (LocalStore, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new(capacity));
    (LocalStore::new(backend.clone()), backend)
}

/// Capacity that fits exactly `n` notes under `key`, but not `n + 1`.
fn capacity_for(key: &str, notes: &[Note], n: usize) -> u64 {
    let serialized = serde_json::to_string(&notes[..n]).unwrap();
    (key.len() + serialized.len()) as u64
}

// ── write ────────────────────────────────────────────────────────

#[test]
fn write_and_read_roundtrip() {
    let store = LocalStore::in_memory();
    assert_eq!(store.write("k", &note(1)), WriteStatus::Ok);
    assert_eq!(store.read("k", note(0)), note(1));
}

#[test]
fn write_classifies_quota() {
    let (store, _) = store_with_capacity(4);
    assert_eq!(
        store.write("key", &"a long enough value"),
        WriteStatus::QuotaExceeded
    );
}

#[test]
fn write_classifies_unknown_fault() {
    let (store, backend) = store_with_capacity(1024);
    backend.fail_next_set("storage disabled");
    assert_eq!(store.write("k", &note(1)), WriteStatus::Failed);
}

#[test]
fn failed_write_leaves_previous_value() {
    let (store, _) = store_with_capacity(64);
    assert_eq!(store.write("k", &note(1)), WriteStatus::Ok);
    // Too big to fit alongside the key — rejected, original intact.
    let huge = "x".repeat(200);
    assert_eq!(store.write("k", &huge), WriteStatus::QuotaExceeded);
    assert_eq!(store.read("k", note(0)), note(1));
}

// ── read ─────────────────────────────────────────────────────────

#[test]
fn read_missing_returns_default() {
    let store = LocalStore::in_memory();
    assert_eq!(store.read("absent", 42), 42);
}

#[test]
fn read_malformed_returns_default() {
    let store = LocalStore::in_memory();
    store.backend().set("k", "{not json").unwrap();
    assert_eq!(store.read("k", note(7)), note(7));
}

#[test]
fn read_wrong_shape_returns_default() {
    let store = LocalStore::in_memory();
    store.backend().set("k", "[1, 2, 3]").unwrap();
    assert_eq!(store.read("k", note(7)), note(7));
}

// ── write_collection_with_trim ───────────────────────────────────

#[test]
fn trim_respects_max_entries() {
    let store = LocalStore::in_memory();
    let notes: Vec<Note> = (0..10).map(note).collect();
    let persisted = store.write_collection_with_trim("k", &notes, 4);
    assert_eq!(persisted, 4);
    // Head is kept: the newest-first prefix.
    let loaded: Vec<Note> = store.read("k", Vec::new());
    assert_eq!(loaded, notes[..4].to_vec());
}

#[test]
fn trim_drops_oldest_until_write_fits() {
    // Scenario: 10 entries fail on quota; the store retries with 9, 8, ...
    // and the first fitting suffix-trimmed prefix (6 here) is persisted.
    let notes: Vec<Note> = (0..10).map(note).collect();
    let (store, _) = store_with_capacity(capacity_for("k", &notes, 6));

    let persisted = store.write_collection_with_trim("k", &notes, 10);
    assert_eq!(persisted, 6);

    let loaded: Vec<Note> = store.read("k", Vec::new());
    assert_eq!(loaded.len(), 6);
    // Removed items are never re-inserted; what survives is the head.
    assert_eq!(loaded, notes[..6].to_vec());
}

#[test]
fn trim_can_drop_everything() {
    // Even the empty collection does not fit: data loss, not a crash.
    let (store, _) = store_with_capacity(1);
    let notes: Vec<Note> = (0..3).map(note).collect();
    assert_eq!(store.write_collection_with_trim("k", &notes, 3), 0);
}

#[test]
fn trim_persists_empty_collection_when_it_fits() {
    let notes: Vec<Note> = (0..3).map(note).collect();
    let (store, _) = store_with_capacity(capacity_for("k", &notes, 0));
    assert_eq!(store.write_collection_with_trim("k", &notes, 3), 0);
    let loaded: Vec<Note> = store.read("k", vec![note(9)]);
    assert!(loaded.is_empty());
}

#[test]
fn trim_gives_up_on_unknown_fault() {
    let (store, backend) = store_with_capacity(1024);
    backend.fail_next_set("storage disabled");
    let notes: Vec<Note> = (0..3).map(note).collect();
    assert_eq!(store.write_collection_with_trim("k", &notes, 3), 0);
}

// ── remove / availability ────────────────────────────────────────

#[test]
fn remove_deletes_value() {
    let store = LocalStore::in_memory();
    store.write("k", &1);
    store.remove("k");
    assert_eq!(store.read("k", 0), 0);
}

#[test]
fn remove_missing_is_noop() {
    let store = LocalStore::in_memory();
    store.remove("never-written");
}

#[test]
fn is_available_when_writable() {
    let store = LocalStore::in_memory();
    assert!(store.is_available());
}

#[test]
fn is_unavailable_when_probe_cannot_write() {
    let (store, _) = store_with_capacity(0);
    assert!(!store.is_available());
}

#[test]
fn availability_probe_leaves_no_residue() {
    let store = LocalStore::in_memory();
    assert!(store.is_available());
    let keys = store.backend().keys().unwrap();
    assert!(keys.is_empty(), "probe key left behind: {keys:?}");
}
