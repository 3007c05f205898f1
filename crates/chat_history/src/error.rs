use storage_backend::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history index {index} is out of range for {len} records")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to serialize chat history: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
