//! JSON output for records and the projected series.

use intake_core::IntakeRecord;
use serde_json::{json, Value};

/// Records as a JSON array, oldest first.
pub fn records_json(records: &[IntakeRecord]) -> Value {
    Value::Array(
        records
            .iter()
            .map(|record| {
                json!({
                    "calories": record.calories,
                    "timestamp": record.timestamp,
                })
            })
            .collect(),
    )
}

/// The chart series with its summary numbers.
pub fn chart_json(series: &[f64]) -> Value {
    let total: f64 = series.iter().sum();
    let max = series.iter().copied().fold(None, |acc: Option<f64>, v| {
        Some(acc.map_or(v, |m| m.max(v)))
    });
    json!({
        "count": series.len(),
        "total": total,
        "max": max,
        "series": series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_records_json_shape() {
        let records = vec![IntakeRecord {
            calories: 450,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap(),
        }];
        let value = records_json(&records);
        assert_eq!(value[0]["calories"], 450);
        assert_eq!(value[0]["timestamp"], "2024-03-05T14:07:00Z");
    }

    #[test]
    fn test_chart_json_summary() {
        let value = chart_json(&[500.0, 300.0, 700.0]);
        assert_eq!(value["count"], 3);
        assert_eq!(value["total"], 1500.0);
        assert_eq!(value["max"], 700.0);
        assert_eq!(value["series"], json!([500.0, 300.0, 700.0]));
    }

    #[test]
    fn test_chart_json_empty() {
        let value = chart_json(&[]);
        assert_eq!(value["count"], 0);
        assert!(value["max"].is_null());
    }
}
