//! Typed accessors for the non-history keys sharing the backend.

use storage_backend::{keys, StorageBackend, StorageError};
use tracing::warn;

pub const DEFAULT_MODEL: &str = "gpt-5.2";

/// Selected-model and auth-blob persistence.
///
/// The auth blob is opaque here; validating or refreshing credentials is
/// the host application's concern.
pub struct Preferences<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> Preferences<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Falls back to [`DEFAULT_MODEL`] when unset or unreadable.
    #[must_use]
    pub fn selected_model(&self) -> String {
        match self.backend.get(keys::SELECTED_MODEL) {
            Ok(Some(model)) if !model.trim().is_empty() => model,
            Ok(_) => DEFAULT_MODEL.to_string(),
            Err(error) => {
                warn!(%error, "selected model unreadable; using default");
                DEFAULT_MODEL.to_string()
            }
        }
    }

    pub fn set_selected_model(&mut self, model: &str) -> Result<(), StorageError> {
        self.backend.set(keys::SELECTED_MODEL, model)
    }

    #[must_use]
    pub fn auth_blob(&self) -> Option<String> {
        self.backend.get(keys::AUTH).ok().flatten()
    }

    pub fn set_auth_blob(&mut self, blob: &str) -> Result<(), StorageError> {
        self.backend.set(keys::AUTH, blob)
    }

    pub fn clear_auth(&mut self) -> Result<(), StorageError> {
        self.backend.remove(keys::AUTH)
    }
}
