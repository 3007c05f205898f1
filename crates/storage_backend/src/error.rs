use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded while writing key '{key}' ({attempted_bytes} bytes)")]
    QuotaExceeded { key: String, attempted_bytes: usize },

    #[error("I/O error while {operation} key '{key}': {source}")]
    Io {
        operation: &'static str,
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage backend failure for key '{key}': {message}")]
    Backend { key: String, message: String },

    #[error("every backend in the fallback chain failed for key '{key}'")]
    Exhausted { key: String },
}

impl StorageError {
    #[must_use]
    pub fn quota(key: impl Into<String>, attempted_bytes: usize) -> Self {
        Self::QuotaExceeded {
            key: key.into(),
            attempted_bytes,
        }
    }

    #[must_use]
    pub fn io(operation: &'static str, key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            key: key.into(),
            source,
        }
    }

    #[must_use]
    pub fn backend(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            key: key.into(),
            message: message.into(),
        }
    }

    /// True for failures that a caller can resolve by shedding data.
    #[must_use]
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}
