//! Bounded, durable chat-history store.
//!
//! An ordered list of question/answer records persisted as one JSON array
//! through a [`storage_backend::StorageBackend`]. The store never trusts
//! persisted shape: every element is normalized on load, corrupt payloads
//! reset to empty, and a quota failure on persist sheds the oldest records
//! until the write fits.

mod config;
mod error;
mod normalize;
mod prefs;
mod record;
mod store;

pub use config::{HistoryConfig, DEFAULT_CAPACITY};
pub use error::HistoryError;
pub use normalize::now_ms;
pub use prefs::{Preferences, DEFAULT_MODEL};
pub use record::HistoryRecord;
pub use store::HistoryStore;
