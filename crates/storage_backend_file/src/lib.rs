//! One-file-per-key [`StorageBackend`] rooted at a directory.
//!
//! Keys are sanitized into file names; values are written whole. A full
//! disk (`ENOSPC`/`EDQUOT`) maps to the quota error class so history
//! eviction can react to it the same way it reacts to any quota store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use storage_backend::{StorageBackend, StorageError};

const VALUE_EXTENSION: &str = "kv";

#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Creates the root directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|source| StorageError::io("creating root directory for", "*", source))?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{VALUE_EXTENSION}", sanitize_key(key)))
    }
}

#[must_use]
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '_' | '-' => c,
            _ => '-',
        })
        .collect()
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::io("reading", key, source)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match fs::write(self.path_for(key), value) {
            Ok(()) => Ok(()),
            Err(error)
                if matches!(
                    error.kind(),
                    ErrorKind::StorageFull | ErrorKind::QuotaExceeded
                ) =>
            {
                Err(StorageError::quota(key, value.len()))
            }
            Err(source) => Err(StorageError::io("writing", key, source)),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::io("removing", key, source)),
        }
    }
}
