//! Persistence medium for the local store.
//!
//! A synchronous string-keyed, string-valued store. `LocalStore` serializes
//! everything it keeps to JSON before handing it to the medium.

mod file;
mod memory;

use std::io;
use std::path::PathBuf;

pub use file::FileStore;
pub use memory::MemoryStore;

/// A synchronous key-value persistence medium.
pub trait KeyValueStore {
    /// Returns the value for `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Errors that can occur in a persistence medium.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing a file.
    IoError(PathBuf, io::Error),
    /// Key cannot be mapped onto the medium.
    InvalidKey(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StorageError::InvalidKey(key) => write!(f, "Invalid storage key: {:?}", key),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(_, e) => Some(e),
            StorageError::InvalidKey(_) => None,
        }
    }
}
