//! Key/value persistence contract consumed by the chat core.
//!
//! The core only requires three operations — `get`, `set`, `remove` — and
//! the ability to tell a storage-quota failure apart from any other failure.
//! Concrete backends live in sibling crates; this crate additionally ships
//! [`FallbackBackend`], a priority-ordered chain for hosts that offer more
//! than one store.

mod error;
mod fallback;
pub mod keys;

pub use error::StorageError;
pub use fallback::FallbackBackend;

/// Minimal text key/value store.
///
/// `set` may fail with a quota-class error (see [`StorageError::is_quota`]);
/// callers that persist evictable data are expected to shed entries and
/// retry on that class only.
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &mut B {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
