//! Save data persistence
//!
//! Platform abstraction over where small text payloads (settings snapshots,
//! save slots) live:
//! - [`FileStorage`]: one file per key under a data directory (desktop)
//! - [`MemoryStorage`]: in-process key-value store (restricted platforms, tests)
//! - [`PlatformStorage`]: picks one of the above for the current target
//!
//! The typed API returns [`SaveError`]; the [`SettingsStorage`] impls log and
//! collapse failures into `false` / `None`.

use latch_settings::SettingsStorage;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FILE_EXTENSION: &str = ".json";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to delete '{path}': {source}")]
    Delete { path: PathBuf, source: io::Error },

    #[error("invalid save key '{key}'")]
    InvalidKey { key: String },
}

/// File-backed storage rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<platform data dir>/latch`, or `./latch` when the platform has none.
    pub fn default_location() -> Self {
        let root = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("latch");
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path backing `key`; `.json` is appended unless already present.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, SaveError> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(SaveError::InvalidKey {
                key: key.to_string(),
            });
        }

        let file_name = if key.ends_with(FILE_EXTENSION) {
            key.to_string()
        } else {
            format!("{key}{FILE_EXTENSION}")
        };
        Ok(self.root.join(file_name))
    }

    pub fn save(&self, key: &str, data: &str) -> Result<(), SaveError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SaveError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, data).map_err(|source| SaveError::Write { path, source })
    }

    /// Read the payload for `key`. A missing file is `Ok(None)`, not an error.
    pub fn load(&self, key: &str) -> Result<Option<String>, SaveError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SaveError::Read { path, source }),
        }
    }

    pub fn exists(&self, key: &str) -> bool {
        self.path_for(key).map(|path| path.is_file()).unwrap_or(false)
    }

    /// Remove the payload for `key`. Returns false if there was nothing to delete.
    pub fn delete(&self, key: &str) -> Result<bool, SaveError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(SaveError::Delete { path, source }),
        }
    }
}

impl SettingsStorage for FileStorage {
    fn try_save(&self, namespace: &str, payload: &str) -> bool {
        match self.save(namespace, payload) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(key = namespace, error = %e, "failed to save data");
                false
            }
        }
    }

    fn try_load(&self, namespace: &str) -> Option<String> {
        match self.load(namespace) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(key = namespace, error = %e, "failed to load data");
                None
            }
        }
    }
}

/// In-process key-value storage.
///
/// Stands in for platform preference stores where the filesystem is not
/// available. Contents live as long as the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, key: &str, data: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), data.to_string());
    }

    pub fn load(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// True when `key` holds a non-empty payload.
    pub fn exists(&self, key: &str) -> bool {
        self.entries
            .borrow()
            .get(key)
            .is_some_and(|data| !data.is_empty())
    }

    pub fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SettingsStorage for MemoryStorage {
    fn try_save(&self, namespace: &str, payload: &str) -> bool {
        self.save(namespace, payload);
        true
    }

    fn try_load(&self, namespace: &str) -> Option<String> {
        self.load(namespace)
    }
}

/// Storage backend for the current target.
#[derive(Debug)]
pub enum PlatformStorage {
    File(FileStorage),
    Memory(MemoryStorage),
}

impl PlatformStorage {
    /// File storage under `root`, except on targets without a writable
    /// filesystem (wasm), which get key-value storage.
    pub fn detect(root: impl Into<PathBuf>) -> Self {
        if cfg!(target_arch = "wasm32") {
            PlatformStorage::Memory(MemoryStorage::new())
        } else {
            PlatformStorage::File(FileStorage::new(root))
        }
    }

    pub fn exists(&self, key: &str) -> bool {
        match self {
            PlatformStorage::File(storage) => storage.exists(key),
            PlatformStorage::Memory(storage) => storage.exists(key),
        }
    }

    pub fn delete(&self, key: &str) -> bool {
        match self {
            PlatformStorage::File(storage) => match storage.delete(key) {
                Ok(deleted) => deleted,
                Err(e) => {
                    tracing::error!(key, error = %e, "failed to delete data");
                    false
                }
            },
            PlatformStorage::Memory(storage) => storage.delete(key),
        }
    }
}

impl SettingsStorage for PlatformStorage {
    fn try_save(&self, namespace: &str, payload: &str) -> bool {
        match self {
            PlatformStorage::File(storage) => storage.try_save(namespace, payload),
            PlatformStorage::Memory(storage) => storage.try_save(namespace, payload),
        }
    }

    fn try_load(&self, namespace: &str) -> Option<String> {
        match self {
            PlatformStorage::File(storage) => storage.try_load(namespace),
            PlatformStorage::Memory(storage) => storage.try_load(namespace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert!(!storage.exists("game_settings"));
        assert_eq!(storage.try_load("game_settings"), None);

        assert!(storage.try_save("game_settings", "{\"entries\":[]}"));
        assert!(storage.exists("game_settings"));
        assert!(dir.path().join("nested/game_settings.json").is_file());
        assert_eq!(
            storage.try_load("game_settings").as_deref(),
            Some("{\"entries\":[]}")
        );
    }

    #[test]
    fn test_extension_is_not_doubled() {
        let storage = FileStorage::new("/tmp/latch");
        assert_eq!(
            storage.path_for("slot1.json").unwrap(),
            PathBuf::from("/tmp/latch/slot1.json")
        );
    }

    #[test]
    fn test_invalid_keys() {
        let storage = FileStorage::new("/tmp/latch");
        assert!(matches!(
            storage.path_for("../escape"),
            Err(SaveError::InvalidKey { .. })
        ));
        assert!(storage.path_for("").is_err());
        assert!(!storage.try_save("", "data"));
    }

    #[test]
    fn test_file_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.save("slot", "data").unwrap();
        assert_eq!(storage.delete("slot").unwrap(), true);
        assert_eq!(storage.delete("slot").unwrap(), false);
        assert!(!storage.exists("slot"));
    }

    #[test]
    fn test_unwritable_root_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let storage = FileStorage::new(&blocker);
        assert!(!storage.try_save("game_settings", "{}"));
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert!(storage.try_load("game_settings").is_none());
        assert!(storage.try_save("game_settings", "payload"));
        assert!(storage.exists("game_settings"));
        assert_eq!(storage.try_load("game_settings").as_deref(), Some("payload"));
        assert!(storage.delete("game_settings"));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_platform_storage_detects_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let storage = PlatformStorage::detect(dir.path());
        assert!(matches!(storage, PlatformStorage::File(_)));

        assert!(storage.try_save("game_settings", "x"));
        assert!(storage.exists("game_settings"));
        assert!(storage.delete("game_settings"));
        assert!(!storage.exists("game_settings"));
    }
}
