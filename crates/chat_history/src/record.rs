use serde::{Deserialize, Serialize};

/// One question/answer exchange.
///
/// Immutable once appended; removed only as a whole record. `timestamp` is
/// epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub timestamp: i64,
}
