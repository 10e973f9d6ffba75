use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Directory-backed medium storing one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a new store rooted at `data_dir`. The directory is created
    /// lazily on first write.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Returns the full path for a key.
    pub fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.data_dir.join(format!("{}.json", key)))
    }

    /// Checks if a value exists on disk.
    pub fn exists(&self, key: &str) -> bool {
        self.path(key).map(|p| p.exists()).unwrap_or(false)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::IoError(path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;

        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StorageError::IoError(self.data_dir.clone(), e))?;

        // Write then rename so a crash never leaves a half-written value.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| StorageError::IoError(tmp.clone(), e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::IoError(path.clone(), e))?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_storage() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStore::new(temp_dir.path().to_path_buf());
        (storage, temp_dir)
    }

    #[test]
    fn test_storage_path() {
        let (storage, _temp) = test_storage();
        let path = storage.path("pa_favorites").unwrap();
        assert!(path.ends_with("pa_favorites.json"));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (storage, _temp) = test_storage();
        assert!(storage.path("../escape").is_err());
        assert!(storage.path("").is_err());
        assert!(storage.path("a/b").is_err());
    }

    #[test]
    fn test_get_nonexistent_returns_none() {
        let (storage, _temp) = test_storage();
        assert!(storage.get("pa_favorites").unwrap().is_none());
    }

    #[test]
    fn test_set_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_dir = temp_dir.path().join("nested").join("data");
        let mut storage = FileStore::new(nested_dir.clone());

        storage.set("pa_presets", "[]").unwrap();

        assert!(nested_dir.exists());
        assert!(storage.exists("pa_presets"));
    }

    #[test]
    fn test_overwrite_leaves_no_temp_file() {
        let (mut storage, temp) = test_storage();

        storage.set("pa_favorites", r#"["a"]"#).unwrap();
        storage.set("pa_favorites", r#"["b","a"]"#).unwrap();

        assert_eq!(
            storage.get("pa_favorites").unwrap().as_deref(),
            Some(r#"["b","a"]"#)
        );
        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_remove() {
        let (mut storage, _temp) = test_storage();

        storage.set("pa_clip_history", "[]").unwrap();
        storage.remove("pa_clip_history").unwrap();
        assert!(!storage.exists("pa_clip_history"));

        // Removing again is fine
        storage.remove("pa_clip_history").unwrap();
    }

    #[test]
    fn test_values_survive_new_instance() {
        let (mut storage, temp) = test_storage();
        storage.set("pa_sync_ref", "abc123def").unwrap();

        let reopened = FileStore::new(temp.path().to_path_buf());
        assert_eq!(
            reopened.get("pa_sync_ref").unwrap().as_deref(),
            Some("abc123def")
        );
    }
}
