//! SQLite storage backend.
//!
//! Records live in a single SQLite database file. Every append is its own
//! committed transaction with `synchronous = FULL`, so a returned record is
//! on disk before any observer hears about it.

mod row;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use crate::error::{IntakeError, Result};
use crate::storage::traits::IntakeStore;
use crate::storage::types::{
    decode_timestamp, encode_timestamp, IntakeRecord, LedgerMetadata, NewRecord,
};

use row::RecordRow;

/// Current on-disk format version.
pub const FORMAT_VERSION: &str = "0.1";

const SCHEMA: &str = r#"
    CREATE TABLE meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- Append-only: rows are never updated or deleted
    CREATE TABLE intake_records (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        calories INTEGER NOT NULL,
        recorded_at TEXT NOT NULL
    );

    CREATE INDEX intake_records_recorded_at
    ON intake_records (recorded_at);
"#;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed intake store.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Connection,
    device_id: Uuid,
}

impl SqliteStore {
    /// Open a fresh, initialized store that lives only in memory.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        let device_id = Self::initialize(&mut conn)?;
        Ok(Self {
            path: None,
            conn,
            device_id,
        })
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn configure(conn: &Connection) -> Result<()> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "synchronous", "FULL")?;
        Ok(())
    }

    fn initialize(conn: &mut Connection) -> Result<Uuid> {
        let device_id = Uuid::new_v4();
        let created_at = encode_timestamp(&Utc::now());

        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA)?;
        for (key, value) in [
            ("format_version", FORMAT_VERSION.to_string()),
            ("device_id", device_id.to_string()),
            ("created_at", created_at.clone()),
            ("last_modified", created_at),
        ] {
            tx.execute(
                "INSERT INTO meta (key, value) VALUES (?, ?)",
                params![key, value],
            )?;
        }
        tx.commit()?;

        Ok(device_id)
    }

    fn meta_value(&self, key: &str) -> Result<String> {
        self.conn
            .query_row("SELECT value FROM meta WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?
            .ok_or_else(|| IntakeError::Storage(format!("Metadata key missing: {}", key)))
    }

    fn meta_timestamp(&self, key: &str) -> Result<DateTime<Utc>> {
        decode_timestamp(&self.meta_value(key)?)
    }
}

impl IntakeStore for SqliteStore {
    fn create(path: &Path) -> Result<Uuid> {
        if path.exists() {
            return Err(IntakeError::AlreadyExists);
        }

        let mut conn = Connection::open(path)?;
        let initialized = Self::configure(&conn).and_then(|_| Self::initialize(&mut conn));
        match initialized {
            Ok(device_id) => {
                debug!(path = %path.display(), %device_id, "created ledger");
                Ok(device_id)
            }
            Err(err) => {
                drop(conn);
                // Don't leave a half-initialized file behind for `open` to trip on.
                let _ = fs::remove_file(path);
                Err(err)
            }
        }
    }

    fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(IntakeError::LedgerNotFound);
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::configure(&conn)?;

        let device_id_str: String = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'device_id'",
                [],
                |row| row.get(0),
            )
            .map_err(|e| {
                IntakeError::Storage(format!(
                    "{} is not an intake ledger: {}",
                    path.display(),
                    e
                ))
            })?;
        let device_id = Uuid::parse_str(&device_id_str)
            .map_err(|e| IntakeError::Storage(format!("Invalid device_id in metadata: {}", e)))?;

        let format_version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        match format_version.as_deref() {
            Some(FORMAT_VERSION) => {}
            Some(other) => {
                return Err(IntakeError::Storage(format!(
                    "Unsupported ledger format version {} (expected {})",
                    other, FORMAT_VERSION
                )))
            }
            None => {
                return Err(IntakeError::Storage(
                    "Metadata key missing: format_version".to_string(),
                ))
            }
        }

        debug!(path = %path.display(), "opened ledger");
        Ok(Self {
            path: Some(path.to_path_buf()),
            conn,
            device_id,
        })
    }

    fn metadata(&self) -> Result<LedgerMetadata> {
        Ok(LedgerMetadata {
            format_version: self.meta_value("format_version")?,
            device_id: self.device_id,
            created_at: self.meta_timestamp("created_at")?,
            last_modified: self.meta_timestamp("last_modified")?,
        })
    }

    fn append(&mut self, record: &NewRecord) -> Result<IntakeRecord> {
        let tx = self.conn.transaction()?;

        let newest: Option<String> = tx
            .query_row(
                "SELECT recorded_at FROM intake_records ORDER BY recorded_at DESC, seq DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let mut recorded_at = encode_timestamp(&record.timestamp);
        if let Some(newest) = newest {
            if newest > recorded_at {
                debug!(%newest, requested = %recorded_at, "clamping timestamp to newest record");
                recorded_at = newest;
            }
        }

        tx.execute(
            "INSERT INTO intake_records (calories, recorded_at) VALUES (?, ?)",
            params![record.calories, recorded_at],
        )?;
        tx.execute(
            "UPDATE meta SET value = ? WHERE key = 'last_modified'",
            [encode_timestamp(&Utc::now())],
        )?;
        tx.commit()?;

        debug!(calories = record.calories, %recorded_at, "appended intake record");
        IntakeRecord::try_from(RecordRow {
            calories: record.calories,
            recorded_at,
        })
    }

    fn records_ascending(&self) -> Result<Vec<IntakeRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT calories, recorded_at FROM intake_records ORDER BY recorded_at ASC, seq ASC",
        )?;
        let rows = stmt.query_map([], RecordRow::from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(IntakeRecord::try_from(row?)?);
        }
        Ok(records)
    }

    fn record_count(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM intake_records", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| IntakeError::Storage(format!("Invalid record count: {}", count)))
    }

    fn check_integrity(&self) -> Result<()> {
        let status: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if status != "ok" {
            return Err(IntakeError::Integrity(status));
        }

        let metadata_count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM meta WHERE key IN ('format_version', 'device_id', 'created_at', 'last_modified')",
            [],
            |row| row.get(0),
        )?;
        if metadata_count < 4 {
            return Err(IntakeError::Integrity(
                "Metadata table missing required keys".to_string(),
            ));
        }

        let mut stmt = self
            .conn
            .prepare("SELECT seq, recorded_at FROM intake_records ORDER BY seq ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut previous: Option<String> = None;
        for row in rows {
            let (seq, recorded_at) = row?;
            decode_timestamp(&recorded_at).map_err(|_| {
                IntakeError::Integrity(format!("Record {} has an invalid timestamp", seq))
            })?;
            if let Some(ref prev) = previous {
                if recorded_at < *prev {
                    return Err(IntakeError::Integrity(format!(
                        "Record {} is older than the record before it",
                        seq
                    )));
                }
            }
            previous = Some(recorded_at);
        }

        Ok(())
    }

    fn backup_to(&self, destination: &Path) -> Result<()> {
        let parent = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| IntakeError::Storage(format!("System time error: {}", e)))?
            .as_nanos();
        let filename = destination
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| IntakeError::Storage("Invalid backup filename".to_string()))?;
        let temp_path = parent.join(format!(".{}.{}.tmp", filename, nanos));
        let temp_str = temp_path
            .to_str()
            .ok_or_else(|| IntakeError::Storage("Backup path is not valid UTF-8".to_string()))?;

        if let Err(err) = self.conn.execute("VACUUM INTO ?", [temp_str]) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }

        crate::fs::rename_with_fallback(&temp_path, destination)
            .map_err(|e| IntakeError::Storage(format!("Atomic rename failed: {}", e)))?;

        debug!(destination = %destination.display(), "wrote ledger backup");
        Ok(())
    }
}
