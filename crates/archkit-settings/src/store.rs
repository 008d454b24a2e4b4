//! File-backed session store
//!
//! Implements the engine's key-value store seam on top of a JSON file in
//! the platform config directory, so canvas sessions survive restarts.
//! The store mirrors its file in memory and rewrites the file on every
//! mutation.

use crate::error::SettingsResult;
use crate::manager::SettingsManager;
use archkit_core::host::KeyValueStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key-value store persisted as a JSON object on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open a store backed by `path`, reading existing entries if the
    /// file is present
    pub fn open(path: PathBuf) -> SettingsResult<Self> {
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };

        Ok(Self { path, entries })
    }

    /// Open the store at its default location under the config directory
    pub fn at_default_location() -> SettingsResult<Self> {
        SettingsManager::ensure_config_dir()?;
        Self::open(SettingsManager::session_file_path()?)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // The store trait is infallible, like browser session storage. A
    // failed write keeps the in-memory entries and is only logged.
    fn flush(&self) {
        let content = match serde_json::to_string_pretty(&self.entries) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to serialize session store: {}", e);
                return;
            }
        };

        if let Err(e) = std::fs::write(&self.path, content) {
            tracing::warn!(
                "Failed to write session store {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persists_entries_across_reopen() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("session.json");

        let mut store = FileStore::open(path.clone()).expect("open store");
        assert!(store.is_empty());
        store.save("archkit.session", "{\"nodes\":[]}");

        let reopened = FileStore::open(path).expect("reopen store");
        assert_eq!(
            reopened.load("archkit.session"),
            Some("{\"nodes\":[]}".to_string())
        );
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn remove_persists() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("session.json");

        let mut store = FileStore::open(path.clone()).expect("open store");
        store.save("archkit.session", "payload");
        store.remove("archkit.session");

        let reopened = FileStore::open(path).expect("reopen store");
        assert_eq!(reopened.load("archkit.session"), None);
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = FileStore::open(dir.path().join("absent.json")).expect("open store");
        assert!(store.is_empty());
        assert_eq!(store.load("anything"), None);
    }
}
