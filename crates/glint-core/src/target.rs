//! Persisted countdown target.
//!
//! The target is stored as a decimal millisecond timestamp in a small
//! string key-value store so that restarting the app continues the same
//! countdown instead of starting a new one.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{info, warn};

use crate::countdown::{MS_PER_DAY, MS_PER_HOUR};

/// Key under which the countdown target is stored.
pub const TARGET_KEY: &str = "auditionTargetDate";

/// Offset applied to "now" when no target has been stored yet (2 days 12 hours).
pub const TARGET_OFFSET_MS: i64 = 2 * MS_PER_DAY + 12 * MS_PER_HOUR;

/// Failure writing to a [`TargetStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write state: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode state: {0}")]
    Encode(String),
}

/// Durable string key-value storage.
pub trait TargetStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TargetStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Return the stored target, or create and store a new one.
///
/// A stored value that does not parse as an integer timestamp is treated as
/// absent. A failed write is logged; the fresh target is still returned.
pub fn resolve_target<S: TargetStore + ?Sized>(store: &mut S, now_ms: i64) -> i64 {
    if let Some(raw) = store.get(TARGET_KEY) {
        match raw.trim().parse::<i64>() {
            Ok(target) => return target,
            Err(e) => warn!(value = %raw, error = %e, "stored countdown target is invalid, regenerating"),
        }
    }

    let target = now_ms.saturating_add(TARGET_OFFSET_MS);
    info!(target_ms = target, "starting new countdown");
    if let Err(e) = store.set(TARGET_KEY, target.to_string()) {
        warn!(error = %e, "could not persist countdown target");
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnlyStore;

    impl TargetStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn test_first_run_stores_offset_target() {
        let mut store = MemoryStore::new();
        let now = 1_700_000_000_000;
        let target = resolve_target(&mut store, now);
        assert_eq!(target, now + TARGET_OFFSET_MS);
        assert_eq!(store.get(TARGET_KEY), Some(target.to_string()));
    }

    #[test]
    fn test_stored_target_is_reused_verbatim() {
        let mut store = MemoryStore::new();
        let first = resolve_target(&mut store, 1_000);
        // Later run, later clock: same target.
        let second = resolve_target(&mut store, 50_000_000);
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_trip_any_timestamp() {
        for t in [0_i64, 1, -86_400_000, 1_700_000_000_123, i64::MAX, i64::MIN] {
            let mut store = MemoryStore::new();
            store.set(TARGET_KEY, t.to_string()).unwrap();
            assert_eq!(resolve_target(&mut store, 42), t);
        }
    }

    #[test]
    fn test_unparsable_target_is_regenerated() {
        let mut store = MemoryStore::new();
        store.set(TARGET_KEY, "next tuesday".to_string()).unwrap();
        let target = resolve_target(&mut store, 10);
        assert_eq!(target, 10 + TARGET_OFFSET_MS);
        assert_eq!(store.get(TARGET_KEY), Some(target.to_string()));
    }

    #[test]
    fn test_write_failure_still_returns_target() {
        let mut store = ReadOnlyStore;
        assert_eq!(resolve_target(&mut store, 0), TARGET_OFFSET_MS);
    }
}
