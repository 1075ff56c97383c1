//! Record row type for database queries.

use crate::error::{IntakeError, Result};
use crate::storage::types::{decode_timestamp, IntakeRecord};

/// Raw row data from the intake_records table, before parsing into domain types.
#[derive(Debug)]
pub struct RecordRow {
    pub calories: i64,
    pub recorded_at: String,
}

impl RecordRow {
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            calories: row.get(0)?,
            recorded_at: row.get(1)?,
        })
    }
}

impl TryFrom<RecordRow> for IntakeRecord {
    type Error = IntakeError;

    fn try_from(row: RecordRow) -> Result<Self> {
        let timestamp = decode_timestamp(&row.recorded_at)?;
        Ok(IntakeRecord {
            calories: row.calories,
            timestamp,
        })
    }
}
