//! Durable key-value store holding serialized collections.
//!
//! # Responsibility
//! - Define the raw `KvStore` contract shared by SQLite and in-memory backends.
//! - Provide typed JSON read/write helpers on top of raw values.
//!
//! # Invariants
//! - `read_json` never fails: missing, unreadable or undecodable values yield
//!   the caller's default.
//! - `write_json` replaces any prior value under the key in one backend write.

use crate::db::DbError;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for backend access and value encoding.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    MissingRequiredTable(&'static str),
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; open the store via db::open_db")
            }
            Self::Encode { key, source } => {
                write!(f, "failed to encode value for key `{key}`: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
            Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw key-value persistence contract.
pub trait KvStore {
    /// Returns the stored value for `key`, or `None` when absent.
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>>;
    /// Durably replaces the value stored under `key`.
    fn write_raw(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// Reads and decodes the JSON value stored under `key`.
///
/// Falls back to `default` when the key is absent, the backend read fails, or
/// the stored text does not decode as `T`.
pub fn read_json<T, S>(store: &S, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    let raw = match store.read_raw(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default,
        Err(err) => {
            warn!(
                "event=store_read module=store status=degraded key={} reason=backend error={}",
                key, err
            );
            return default;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=store_read module=store status=degraded key={} reason=decode error={}",
                key, err
            );
            default
        }
    }
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let encoded = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.write_raw(key, &encoded)
}
