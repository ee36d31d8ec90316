//! Key-value state file backing the countdown target.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use glint_core::{StoreError, TargetStore};
use tracing::warn;

use crate::ConfigError;

/// A flat `key = "value"` TOML file, rewritten in full on every `set`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at the platform state path.
    pub fn open_default() -> Result<Self, ConfigError> {
        Ok(Self::open(crate::state_path()?))
    }

    /// Open the store at `path`.
    ///
    /// A missing file starts empty. An unreadable or malformed file is logged
    /// and also starts empty, so its entries are regenerated on next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable state file");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, ConfigError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl TargetStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        let content =
            toml::to_string(&self.entries).map_err(|e| StoreError::Encode(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{TARGET_KEY, TARGET_OFFSET_MS, resolve_target};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("glint-state-{}-{}", name, std::process::id()))
            .join("state.toml")
    }

    #[test]
    fn test_target_survives_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        let mut store = FileStore::open(&path);
        let target = resolve_target(&mut store, 1_700_000_000_000);
        assert_eq!(target, 1_700_000_000_000 + TARGET_OFFSET_MS);

        // A second "run" with a later clock keeps the stored target.
        let mut reopened = FileStore::open(&path);
        assert_eq!(resolve_target(&mut reopened, 1_800_000_000_000), target);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_round_trip_exact_value() {
        let path = temp_path("exact");
        let t: i64 = 9_007_199_254_740_993;
        let mut store = FileStore::open(&path);
        store.set(TARGET_KEY, t.to_string()).unwrap();

        let mut reopened = FileStore::open(&path);
        assert_eq!(resolve_target(&mut reopened, 0), t);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "this is = = not toml").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get(TARGET_KEY), None);
        assert_eq!(store.path(), path.as_path());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_other_keys_are_preserved() {
        let path = temp_path("keys");
        let _ = fs::remove_file(&path);
        let mut store = FileStore::open(&path);
        store.set("other", "value".to_string()).unwrap();
        store.set(TARGET_KEY, "5".to_string()).unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("other").as_deref(), Some("value"));
        assert_eq!(reopened.get(TARGET_KEY).as_deref(), Some("5"));

        let _ = fs::remove_file(&path);
    }
}
