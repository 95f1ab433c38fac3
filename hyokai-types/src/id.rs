//! Entry id and timestamp generation.

use uuid::Uuid;

/// Generates a fresh ledger entry id.
///
/// UUIDv7 combines a millisecond time component with random bits, so ids
/// stay unique even for appends within the same clock tick.
pub fn new_entry_id() -> String {
    Uuid::now_v7().to_string()
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
