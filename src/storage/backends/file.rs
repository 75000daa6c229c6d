//! File-based storage backend implementation

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::storage::{
    error::{StorageError, StorageResult},
    traits::KeyValueStore,
};

/// File-based storage backend
///
/// Each key is stored as `<base_dir>/<key>.json`. Writes go through a
/// temporary file followed by a rename so a crash never leaves a torn record.
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    /// Create a new file backend rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        debug!("File storage rooted at {}", base_dir.display());
        Ok(Self { base_dir })
    }

    /// Get the base directory for storage
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn key_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.base_dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let final_file = self.key_path(key)?;
        let temp_file = self.base_dir.join(format!("{}.json.tmp", key));

        fs::write(&temp_file, value)?;
        fs::rename(&temp_file, &final_file)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

/// Keys map onto file names, so only a conservative character set is allowed
fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::invalid_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path()).unwrap();

        assert!(backend.get("user").unwrap().is_none());

        backend.set("user", r#"{"id":"1"}"#).unwrap();
        assert_eq!(backend.get("user").unwrap().as_deref(), Some(r#"{"id":"1"}"#));
        assert!(temp_dir.path().join("user.json").exists());
        assert!(!temp_dir.path().join("user.json.tmp").exists());

        backend.remove("user").unwrap();
        assert!(backend.get("user").unwrap().is_none());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path()).unwrap();
        backend.remove("never-written").unwrap();
    }

    #[test]
    fn test_set_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path()).unwrap();
        backend.set("user", "first").unwrap();
        backend.set("user", "second").unwrap();
        assert_eq!(backend.get("user").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_values_survive_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        FileBackend::new(temp_dir.path())
            .unwrap()
            .set("user", "persisted")
            .unwrap();

        let reopened = FileBackend::new(temp_dir.path()).unwrap();
        assert_eq!(reopened.get("user").unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path()).unwrap();

        for key in ["", "../escape", "a/b", ".hidden"] {
            let err = backend.set(key, "x").unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey(_)), "key {:?}", key);
        }
    }

    #[test]
    fn test_creates_missing_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let backend = FileBackend::new(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(backend.base_dir(), nested.as_path());
    }
}
