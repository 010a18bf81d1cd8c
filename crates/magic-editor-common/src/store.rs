//! Key-value blob storage for editor content.
//!
//! The editor persists a single opaque HTML string under a fixed key. The store
//! is loaded once on attach and written on every content update.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Storage for persisted editor content, keyed by a fixed identifier.
pub trait ContentStore {
    /// Load the blob stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous blob.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store. Contents are lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-seeded with a single entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl ContentStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Store that keeps one `<key>.html` file per key inside a directory.
pub struct FileStore<T = PathBuf>
where
    T: AsRef<Path>,
{
    path: T,
}

impl<T> FileStore<T>
where
    T: AsRef<Path>,
{
    pub fn new(path: T) -> Self {
        Self { path }
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StoreError::InvalidKey {
                key: key.to_owned(),
            });
        }
        Ok(self.path.as_ref().join(format!("{key}.html")))
    }
}

impl<T> ContentStore for FileStore<T>
where
    T: AsRef<Path>,
{
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no stored content");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        std::fs::create_dir_all(self.path.as_ref())?;
        std::fs::write(&path, value)?;
        tracing::trace!(path = %path.display(), bytes = value.len(), "content saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("doc").unwrap(), None);
        store.save("doc", "<p>a</p>").unwrap();
        store.save("doc", "<p>b</p>").unwrap();
        assert_eq!(store.load("doc").unwrap().as_deref(), Some("<p>b</p>"));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("content"));

        assert_eq!(store.load("magic-editor-content").unwrap(), None);
        store.save("magic-editor-content", "<p>saved</p>").unwrap();
        assert_eq!(
            store.load("magic-editor-content").unwrap().as_deref(),
            Some("<p>saved</p>")
        );
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        assert!(matches!(
            store.save("../escape", "x"),
            Err(StoreError::InvalidKey { .. })
        ));
        assert!(matches!(store.load(""), Err(StoreError::InvalidKey { .. })));
    }
}
