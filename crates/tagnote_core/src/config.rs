//! Runtime configuration for opening the store and logging.
//!
//! # Responsibility
//! - Resolve the database location and logging settings.
//! - Apply precedence: explicit overrides, then environment, then defaults.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; invalid log levels are reported by
//!   [`crate::logging::init_logging`].

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::default_log_level;
use rusqlite::Connection;
use std::path::PathBuf;

/// Environment variable naming the SQLite file (or `:memory:`).
pub const DB_PATH_ENV: &str = "TAGNOTE_DB_PATH";
/// Environment variable naming the log level.
pub const LOG_LEVEL_ENV: &str = "TAGNOTE_LOG_LEVEL";
/// Environment variable naming the absolute log directory.
pub const LOG_DIR_ENV: &str = "TAGNOTE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "tagnote.sqlite3";
const MEMORY_DB_MARKER: &str = ":memory:";

/// Where the key-value store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

impl DbLocation {
    fn parse(value: &str) -> Self {
        if value == MEMORY_DB_MARKER {
            Self::Memory
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db: DbLocation,
    pub log_level: String,
    /// File logging is enabled only when set.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db: DbLocation::File(std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value_of = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(db) = value_of(DB_PATH_ENV) {
            config.db = DbLocation::parse(&db);
        }
        if let Some(level) = value_of(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        if let Some(dir) = value_of(LOG_DIR_ENV) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        config
    }

    /// Applies explicit overrides (e.g. command-line flags) on top.
    pub fn with_overrides(
        mut self,
        db: Option<&str>,
        log_level: Option<&str>,
        log_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(db) = db.map(str::trim).filter(|value| !value.is_empty()) {
            self.db = DbLocation::parse(db);
        }
        if let Some(level) = log_level.map(str::trim).filter(|value| !value.is_empty()) {
            self.log_level = level.to_string();
        }
        if log_dir.is_some() {
            self.log_dir = log_dir;
        }
        self
    }

    /// Opens and migrates the configured database.
    pub fn open_connection(&self) -> DbResult<Connection> {
        match &self.db {
            DbLocation::File(path) => open_db(path),
            DbLocation::Memory => open_db_in_memory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DbLocation, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = CoreConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = CoreConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "   ")]));
        assert_eq!(config.db, CoreConfig::default().db);
    }

    #[test]
    fn environment_values_are_applied() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, ":memory:"),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/var/log/tagnote"),
        ]));
        assert_eq!(config.db, DbLocation::Memory);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/tagnote")));
    }

    #[test]
    fn overrides_take_precedence_over_environment() {
        let config = CoreConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, ":memory:")]))
            .with_overrides(Some("/tmp/notes.sqlite3"), Some("error"), None);
        assert_eq!(
            config.db,
            DbLocation::File(PathBuf::from("/tmp/notes.sqlite3"))
        );
        assert_eq!(config.log_level, "error");
    }

    #[test]
    fn memory_connection_opens_migrated() {
        let config = CoreConfig {
            db: DbLocation::Memory,
            ..CoreConfig::default()
        };
        let conn = config.open_connection().unwrap();
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, crate::db::migrations::latest_version());
    }
}
