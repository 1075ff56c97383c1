//! Text rendering for record lists.

use intake_core::IntakeRecord;

use crate::ui::{group_thousands, Column, TimeDisplay};

/// Columns of the pretty record table.
pub const LIST_COLUMNS: [Column; 2] = [Column::new("When"), Column::right("Calories")];

/// Table rows for the pretty list.
pub fn record_rows(records: &[IntakeRecord], display: &TimeDisplay) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            vec![
                display.format(&record.timestamp),
                group_thousands(record.calories),
            ]
        })
        .collect()
}

/// One plain-text line per record: "Calories: N" then the short date.
pub fn record_line(record: &IntakeRecord, display: &TimeDisplay) -> String {
    format!(
        "Calories: {}  {}",
        record.calories,
        display.format(&record.timestamp)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(calories: i64) -> IntakeRecord {
        IntakeRecord {
            calories,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap(),
        }
    }

    #[test]
    fn test_record_line() {
        let display = TimeDisplay::new(Some(chrono_tz::UTC), None);
        assert_eq!(
            record_line(&record(450), &display),
            "Calories: 450  3/5/24, 2:07 PM"
        );
    }

    #[test]
    fn test_record_rows_group_digits() {
        let display = TimeDisplay::new(Some(chrono_tz::UTC), None);
        let rows = record_rows(&[record(1250)], &display);
        assert_eq!(rows, vec![vec!["3/5/24, 2:07 PM".to_string(), "1,250".to_string()]]);
    }
}
