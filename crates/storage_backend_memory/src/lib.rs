//! In-memory [`StorageBackend`] with an optional byte quota.
//!
//! Primarily a test double: the quota makes storage-pressure behavior
//! reproducible without filling a real disk. Also usable as the last link
//! of a fallback chain when no durable store is available.

use std::collections::BTreeMap;

use storage_backend::{StorageBackend, StorageError};

#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    map: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the sum of key and value bytes across all entries.
    #[must_use]
    pub fn with_quota_bytes(quota_bytes: usize) -> Self {
        Self {
            map: BTreeMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn bytes_after_insert(&self, key: &str, value: &str) -> usize {
        let mut total = key.len() + value.len();
        for (existing_key, existing_value) in &self.map {
            if existing_key != key {
                total += existing_key.len() + existing_value.len();
            }
        }
        total
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            if self.bytes_after_insert(key, value) > quota {
                return Err(StorageError::quota(key, value.len()));
            }
        }
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.map.remove(key);
        Ok(())
    }
}
