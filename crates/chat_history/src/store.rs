use serde_json::Value;
use storage_backend::StorageBackend;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::config::HistoryConfig;
use crate::error::HistoryError;
use crate::normalize::{normalize_record, now_ms};
use crate::record::HistoryRecord;

/// Ordered, capacity-bounded record list persisted as one JSON array.
///
/// After any successful `append`/`delete_at`/`load` the list holds at most
/// `capacity` records, oldest first, and (when persistence succeeded) the
/// backend content matches memory exactly.
pub struct HistoryStore<B: StorageBackend> {
    backend: B,
    config: HistoryConfig,
    items: Vec<HistoryRecord>,
}

impl<B: StorageBackend> HistoryStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, HistoryConfig::default())
    }

    pub fn with_config(backend: B, config: HistoryConfig) -> Self {
        Self {
            backend,
            config,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[HistoryRecord] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Hydrates from the backend. Missing, unparseable, or non-array data
    /// resets the store to empty; individual records are normalized field
    /// by field. Oversized payloads keep only the most recent `capacity`
    /// records and are persisted back in that truncated form.
    pub fn load(&mut self) -> Result<(), HistoryError> {
        let raw = match self.backend.get(&self.config.key) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(key = %self.config.key, %error, "history read failed; starting empty");
                None
            }
        };
        let Some(raw) = raw else {
            self.items = Vec::new();
            return Ok(());
        };

        let parsed = serde_json::from_str::<Value>(&raw).unwrap_or(Value::Null);
        let Some(elements) = parsed.as_array() else {
            warn!(key = %self.config.key, "persisted history is not a JSON array; resetting");
            self.items = Vec::new();
            return Ok(());
        };

        let now = now_ms();
        self.items = elements
            .iter()
            .map(|element| normalize_record(element, now))
            .collect();

        if self.items.len() > self.config.capacity {
            let excess = self.items.len() - self.config.capacity;
            warn!(
                excess,
                capacity = self.config.capacity,
                "persisted history exceeds capacity; truncating oldest"
            );
            self.items.drain(..excess);
            self.persist()?;
        }

        Ok(())
    }

    /// Appends a freshly stamped record, enforces capacity, and persists.
    pub fn append(&mut self, question: &str, answer: &str) -> Result<HistoryRecord, HistoryError> {
        let record = HistoryRecord {
            id: Uuid::new_v4().to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            timestamp: now_ms(),
        };

        self.items.push(record.clone());
        while self.items.len() > self.config.capacity {
            self.items.remove(0);
        }
        self.persist()?;
        Ok(record)
    }

    /// Removes the record at `index`; the list is untouched on a bad index.
    pub fn delete_at(&mut self, index: usize) -> Result<(), HistoryError> {
        if index >= self.items.len() {
            return Err(HistoryError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.items.remove(index);
        self.persist()
    }

    /// Serializes the full list to the backend. A quota failure evicts the
    /// oldest record and retries until the write fits; any other failure
    /// stops immediately and leaves memory intact.
    pub fn persist(&mut self) -> Result<(), HistoryError> {
        loop {
            let payload =
                serde_json::to_string(&self.items).map_err(HistoryError::Serialize)?;
            match self.backend.set(&self.config.key, &payload) {
                Ok(()) => {
                    debug!(records = self.items.len(), "history persisted");
                    return Ok(());
                }
                Err(quota) if quota.is_quota() && !self.items.is_empty() => {
                    warn!(
                        records = self.items.len(),
                        "storage quota exceeded; evicting oldest record"
                    );
                    self.items.remove(0);
                }
                Err(other) => {
                    error!(%other, "history persist failed");
                    return Err(other.into());
                }
            }
        }
    }
}
