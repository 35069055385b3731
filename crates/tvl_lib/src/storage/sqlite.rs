use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::fs::create_dir_all;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use super::schema::create_tables;
use crate::types::TvlRecord;

/// Append-only store of computed TVL values.
#[derive(Clone)]
pub struct TvlStore {
    conn: Arc<Mutex<Connection>>,
}

impl TvlStore {
    pub fn open(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory for {}", path))?;
        }

        let conn =
            Connection::open(path).with_context(|| format!("Failed to open database {}", path))?;
        let _ = conn.pragma_update(None, "journal_mode", "WAL");
        let _ = conn.pragma_update(None, "synchronous", "NORMAL");
        let _ = conn.pragma_update(None, "busy_timeout", 5000);

        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        create_tables(&conn).context("Failed to create tables")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Append one record. Values are normalized before storage.
    pub fn record(&self, value: Decimal, computed_at: DateTime<Utc>) -> Result<TvlRecord> {
        let value = value.normalize();
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO tvl (value, computed_at) VALUES (?1, ?2)",
            params![value.to_string(), computed_at.timestamp_millis()],
        )
        .context("Failed to insert tvl")?;

        Ok(TvlRecord {
            id: conn.last_insert_rowid(),
            value,
            computed_at: truncate_to_millis(computed_at)?,
        })
    }

    /// Most recent record by `computed_at`, if any pass has been stored.
    pub fn latest(&self) -> Result<Option<TvlRecord>> {
        let conn = self.lock()?;

        let row = conn
            .query_row(
                "SELECT id, value, computed_at FROM tvl ORDER BY computed_at DESC, id DESC LIMIT 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()
            .context("Failed to query latest tvl")?;

        let Some((id, value, millis)) = row else {
            return Ok(None);
        };

        let value = Decimal::from_str(&value)
            .with_context(|| format!("Corrupt tvl value in row {}: {}", id, value))?;
        let computed_at = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| anyhow!("Corrupt tvl timestamp in row {}: {}", id, millis))?;

        Ok(Some(TvlRecord {
            id,
            value,
            computed_at,
        }))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection poisoned"))
    }
}

fn truncate_to_millis(ts: DateTime<Utc>) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ts.timestamp_millis())
        .ok_or_else(|| anyhow!("timestamp out of range: {}", ts))
}
