// secdash-core/src/store.rs
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("State directory not found")]
    NoStateDir,
}

/// Durable storage of one serialized value per string key.
///
/// Last write wins; there is no coordination between processes. Callers
/// treat the in-memory copy as the source of truth after the initial read.
pub trait StateStore {
    /// Previously stored value, or None if never written or unreadable
    fn read(&self, key: &str) -> Option<String>;

    /// Serialize-and-overwrite under `key`
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// File-backed store: one `<key>.json` file per key under a state directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the per-user config directory
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = dirs::config_dir()
            .ok_or(StoreError::NoStateDir)?
            .join("secdash");
        Ok(Self::new(dir))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory store, shared between clones.
///
/// Used when no config directory is available and as the test double for
/// layout persistence. Cloning hands out another handle to the same map, so
/// tests can keep one handle while the layout store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_store_roundtrip() {
        let mut store = MemStore::new();
        assert_eq!(store.read("missing"), None);

        store.write("k", "v1").unwrap();
        store.write("k", "v2").unwrap();
        assert_eq!(store.read("k").as_deref(), Some("v2"));
    }

    #[test]
    fn test_mem_store_clones_share_state() {
        let mut writer = MemStore::new();
        let reader = writer.clone();

        writer.write("k", "v").unwrap();
        assert_eq!(reader.read("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("state"));

        assert_eq!(store.read("layout"), None);
        store.write("layout", "[1,2]").unwrap();
        assert_eq!(store.read("layout").as_deref(), Some("[1,2]"));

        // Reopening the same directory sees the previous write
        let reopened = FileStore::new(dir.path().join("state"));
        assert_eq!(reopened.read("layout").as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_file_store_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.write("a", "1").unwrap();
        store.write("b", "2").unwrap();
        assert_eq!(store.read("a").as_deref(), Some("1"));
        assert_eq!(store.read("b").as_deref(), Some("2"));
    }
}
