//! SQLite-backed `KvStore`.
//!
//! # Invariants
//! - One write is one upsert statement; no partial values are observable.
//! - The connection must be migrated (`kv_entries` present) before use.

use super::{KvStore, StoreError, StoreResult};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store over the `kv_entries` table.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Constructs a store from a migrated connection.
    ///
    /// # Errors
    /// - Returns an error when the `kv_entries` table is missing.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_kv_table(conn)?;
        Ok(Self { conn })
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_raw(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let result = self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        );

        match result {
            Ok(_) => {
                debug!(
                    "event=store_write module=store status=ok key={} bytes={}",
                    key,
                    value.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_write module=store status=error key={} error={}",
                    key, err
                );
                Err(err.into())
            }
        }
    }
}

fn ensure_kv_table(conn: &Connection) -> StoreResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'kv_entries'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists == 1 {
        Ok(())
    } else {
        Err(StoreError::MissingRequiredTable("kv_entries"))
    }
}
