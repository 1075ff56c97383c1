//! Core data types for the storage layer.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{IntakeError, Result};

/// Metadata for a ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerMetadata {
    /// Format version (e.g., "0.1")
    pub format_version: String,

    /// Device that created this ledger
    pub device_id: Uuid,

    /// When this ledger was created
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp (informational)
    pub last_modified: DateTime<Utc>,
}

/// One logged calorie entry.
///
/// Records are immutable once stored. Identity is positional; there is
/// no external identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeRecord {
    /// Calorie amount (zero and negative values are accepted)
    pub calories: i64,

    /// When the record was logged
    pub timestamp: DateTime<Utc>,
}

/// Builder for records not yet written.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub calories: i64,
    pub timestamp: DateTime<Utc>,
}

impl NewRecord {
    /// A record stamped with the current time.
    pub fn new(calories: i64) -> Self {
        Self {
            calories,
            timestamp: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Encode a timestamp in the fixed-width form used as the sort key.
///
/// Microsecond precision with a `Z` suffix keeps every stored value the same
/// length, so text ordering matches chronological ordering.
pub fn encode_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Decode a stored timestamp.
pub fn decode_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| IntakeError::Storage(format!("Invalid timestamp {}: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_record_builder() {
        let at = Utc.with_ymd_and_hms(2018, 10, 26, 12, 0, 0).unwrap();
        let record = NewRecord::new(500).with_timestamp(at);

        assert_eq!(record.calories, 500);
        assert_eq!(record.timestamp, at);
    }

    #[test]
    fn test_encoded_timestamps_have_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let fractional = whole + chrono::Duration::milliseconds(500);

        let a = encode_timestamp(&whole);
        let b = encode_timestamp(&fractional);

        assert_eq!(a, "2024-01-01T00:00:00.000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }

    #[test]
    fn test_decode_truncates_to_micros() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 8, 30, 0).unwrap()
            + chrono::Duration::nanoseconds(1_234_567);
        let decoded = decode_timestamp(&encode_timestamp(&at)).unwrap();

        assert_eq!(
            decoded,
            Utc.with_ymd_and_hms(2024, 3, 9, 8, 30, 0).unwrap()
                + chrono::Duration::microseconds(1_234)
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_record_serializes_calories_and_timestamp() {
        let record = IntakeRecord {
            calories: 300,
            timestamp: Utc.with_ymd_and_hms(2018, 10, 26, 9, 15, 0).unwrap(),
        };
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["calories"], 300);
        assert_eq!(value["timestamp"], "2018-10-26T09:15:00Z");
    }
}
