//! Priority-ordered backend chain.
//!
//! Hosts may offer several stores of decreasing preference (a native
//! database, then plain local files, for example). Each operation is tried
//! against the chain in order and falls through on failure. When every
//! backend fails, the first backend's error is surfaced so that quota
//! handling applies to the preferred store.

use crate::{StorageBackend, StorageError};

#[derive(Default)]
pub struct FallbackBackend {
    backends: Vec<Box<dyn StorageBackend>>,
}

impl FallbackBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, backend: impl StorageBackend + 'static) -> Self {
        self.backends.push(Box::new(backend));
        self
    }

    pub fn push(&mut self, backend: impl StorageBackend + 'static) {
        self.backends.push(Box::new(backend));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl StorageBackend for FallbackBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut first_error = None;
        for backend in &self.backends {
            match backend.get(key) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
        }
        Err(first_error.unwrap_or_else(|| StorageError::Exhausted {
            key: key.to_string(),
        }))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut first_error = None;
        for backend in &mut self.backends {
            match backend.set(key, value) {
                Ok(()) => return Ok(()),
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
        }
        Err(first_error.unwrap_or_else(|| StorageError::Exhausted {
            key: key.to_string(),
        }))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut first_error = None;
        for backend in &mut self.backends {
            match backend.remove(key) {
                Ok(()) => return Ok(()),
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
        }
        Err(first_error.unwrap_or_else(|| StorageError::Exhausted {
            key: key.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::FallbackBackend;
    use crate::{StorageBackend, StorageError};

    #[derive(Default)]
    struct MapBackend {
        map: BTreeMap<String, String>,
    }

    impl StorageBackend for MapBackend {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.map.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.map.insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.map.remove(key);
            Ok(())
        }
    }

    struct BrokenBackend;

    impl StorageBackend for BrokenBackend {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::backend(key, "unavailable"))
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::backend(key, "unavailable"))
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            Err(StorageError::backend(key, "unavailable"))
        }
    }

    struct FullBackend;

    impl StorageBackend for FullBackend {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            Err(StorageError::quota(key, value.len()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn set_falls_through_to_next_backend() {
        let mut chain = FallbackBackend::new()
            .with(BrokenBackend)
            .with(MapBackend::default());

        chain.set("k", "v").expect("second backend should accept");
        assert_eq!(chain.get("k").expect("get should pass"), Some("v".into()));
    }

    #[test]
    fn all_failing_surfaces_first_error() {
        let mut chain = FallbackBackend::new().with(FullBackend).with(BrokenBackend);
        let error = chain.set("k", "v").expect_err("both backends fail");
        assert!(error.is_quota());
    }

    #[test]
    fn empty_chain_reports_exhausted() {
        let chain = FallbackBackend::new();
        let error = chain.get("k").expect_err("no backends available");
        assert!(matches!(error, StorageError::Exhausted { .. }));
    }
}
