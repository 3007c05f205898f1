//! Deserialization-boundary normalization.
//!
//! Persisted data may come back from any backend in any shape. Every loaded
//! element passes through [`normalize_record`] so the in-memory store only
//! ever holds well-formed records.

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::record::HistoryRecord;

/// Current time as epoch milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

pub(crate) fn normalize_record(raw: &Value, now: i64) -> HistoryRecord {
    let Some(fields) = raw.as_object() else {
        return HistoryRecord {
            id: now.to_string(),
            question: String::new(),
            answer: String::new(),
            timestamp: now,
        };
    };

    let timestamp = normalize_timestamp(fields.get("timestamp"), now);
    let id = match fields.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(other) => {
            let stringified = normalize_text(Some(other));
            if stringified.is_empty() {
                timestamp.to_string()
            } else {
                stringified
            }
        }
        None => timestamp.to_string(),
    };

    HistoryRecord {
        id,
        question: normalize_text(fields.get("question")),
        answer: normalize_text(fields.get("answer")),
        timestamp,
    }
}

/// Best-effort stringification; values with no sensible text form become
/// the empty string.
pub(crate) fn normalize_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) | None => String::new(),
    }
}

/// Accepts epoch numbers, numeric strings, and RFC3339 date strings.
pub(crate) fn normalize_timestamp(value: Option<&Value>, fallback: i64) -> i64 {
    match value {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|float| float.is_finite())
                    .map(|float| float as i64)
            })
            .unwrap_or(fallback),
        Some(Value::String(text)) => parse_timestamp_text(text).unwrap_or(fallback),
        _ => fallback,
    }
}

fn parse_timestamp_text(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(millis) = text.parse::<i64>() {
        return Some(millis);
    }
    if let Ok(millis) = text.parse::<f64>() {
        if millis.is_finite() {
            return Some(millis as i64);
        }
    }
    OffsetDateTime::parse(text, &Rfc3339)
        .ok()
        .map(|parsed| (parsed.unix_timestamp_nanos() / 1_000_000) as i64)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{normalize_record, normalize_text, normalize_timestamp};

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn timestamp_accepts_numbers_and_numeric_strings() {
        assert_eq!(normalize_timestamp(Some(&json!(42)), NOW), 42);
        assert_eq!(normalize_timestamp(Some(&json!(42.9)), NOW), 42);
        assert_eq!(normalize_timestamp(Some(&json!("1234")), NOW), 1234);
        assert_eq!(normalize_timestamp(Some(&json!(" 1234 ")), NOW), 1234);
    }

    #[test]
    fn timestamp_accepts_rfc3339_strings() {
        let parsed = normalize_timestamp(Some(&json!("2023-11-14T22:13:20Z")), NOW);
        assert_eq!(parsed, 1_700_000_000_000);
    }

    #[test]
    fn unparseable_timestamp_falls_back() {
        assert_eq!(normalize_timestamp(Some(&json!("soon")), NOW), NOW);
        assert_eq!(normalize_timestamp(Some(&json!(null)), NOW), NOW);
        assert_eq!(normalize_timestamp(None, NOW), NOW);
        assert_eq!(normalize_timestamp(Some(&json!([1])), NOW), NOW);
    }

    #[test]
    fn text_normalization_never_fails() {
        assert_eq!(normalize_text(Some(&json!("hi"))), "hi");
        assert_eq!(normalize_text(Some(&json!(7))), "7");
        assert_eq!(normalize_text(Some(&json!(true))), "true");
        assert_eq!(normalize_text(Some(&json!(null))), "");
        assert_eq!(normalize_text(Some(&json!({"a": 1}))), "");
        assert_eq!(normalize_text(None), "");
    }

    #[test]
    fn non_object_record_gets_full_defaults() {
        let record = normalize_record(&json!("garbage"), NOW);
        assert_eq!(record.id, NOW.to_string());
        assert_eq!(record.question, "");
        assert_eq!(record.answer, "");
        assert_eq!(record.timestamp, NOW);
    }

    #[test]
    fn missing_id_becomes_stringified_timestamp() {
        let record = normalize_record(&json!({"question": "q", "timestamp": 99}), NOW);
        assert_eq!(record.id, "99");
        assert_eq!(record.question, "q");
        assert_eq!(record.timestamp, 99);
    }

    #[test]
    fn numeric_id_is_stringified() {
        let record = normalize_record(&json!({"id": 17, "answer": 3}), NOW);
        assert_eq!(record.id, "17");
        assert_eq!(record.answer, "3");
        assert_eq!(record.timestamp, NOW);
    }
}
