//! SQLite-backed store.
//!
//! Reads catalog rows with a single read-only `SELECT`:
//!
//! ```sql
//! CREATE TABLE messages (
//!     code             TEXT PRIMARY KEY,
//!     type             TEXT,
//!     title            TEXT,
//!     description      TEXT,
//!     http_status_code INTEGER,
//!     hint             TEXT
//! );
//! ```
//!
//! NULL columns become absent template fields, so a row can override only
//! part of an entry defined by an earlier store. The database is opened
//! read-only and never written.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};
use serde::Deserialize;
use tracing::{debug, instrument};

use resmsg_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{MessageTemplate, MessageType, TemplateMap},
    error::{ResmsgError, ResmsgResult},
};

/// Table read when none is configured.
pub const DEFAULT_TABLE: &str = "messages";

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Configuration for the SQLite store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
    /// Table holding the catalog rows.
    #[serde(default = "default_table")]
    pub table: String,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl SqliteStoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: default_table(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

/// Catalog rows from an SQLite table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    config: SqliteStoreConfig,
}

impl SqliteStore {
    /// Build a store after checking the table name.
    ///
    /// # Errors
    ///
    /// `Configuration` if the table name is not a plain identifier.
    pub fn new(config: SqliteStoreConfig) -> ResmsgResult<Self> {
        validate_table_name(&config.table)?;
        Ok(Self { config })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn table(&self) -> &str {
        &self.config.table
    }

    fn unavailable(&self, reason: impl ToString) -> ResmsgError {
        ApplicationError::StoreUnavailable {
            store: self.name(),
            reason: reason.to_string(),
        }
        .into()
    }

    fn invalid_row(&self, code: &str, reason: impl std::fmt::Display) -> ResmsgError {
        ApplicationError::InvalidMessageFile {
            source_name: self.name(),
            reason: format!("row '{code}': {reason}"),
        }
        .into()
    }

    fn open(&self) -> ResmsgResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = Connection::open_with_flags(&self.config.path, flags)
            .map_err(|e| self.unavailable(e))?;
        connection
            .busy_timeout(Duration::from_millis(self.config.busy_timeout_ms))
            .map_err(|e| self.unavailable(e))?;
        Ok(connection)
    }
}

/// One row as stored, before type/status conversion.
struct RawRow {
    code: String,
    message_type: Option<String>,
    title: Option<String>,
    description: Option<String>,
    http_status_code: Option<i64>,
    hint: Option<String>,
}

impl TemplateStore for SqliteStore {
    fn name(&self) -> String {
        format!("sqlite:{}#{}", self.config.path.display(), self.config.table)
    }

    #[instrument(skip(self), fields(store = %self.name()))]
    fn load(&self) -> ResmsgResult<TemplateMap> {
        let connection = self.open()?;
        let sql = format!(
            "SELECT code, type, title, description, http_status_code, hint FROM \"{}\"",
            self.config.table
        );

        let mut statement = connection.prepare(&sql).map_err(|e| self.unavailable(e))?;
        let rows = statement
            .query_map([], |row| {
                Ok(RawRow {
                    code: row.get(0)?,
                    message_type: row.get(1)?,
                    title: row.get(2)?,
                    description: row.get(3)?,
                    http_status_code: row.get(4)?,
                    hint: row.get(5)?,
                })
            })
            .map_err(|e| self.unavailable(e))?;

        let mut catalog = TemplateMap::new();
        for row in rows {
            let raw = row.map_err(|e| self.unavailable(e))?;

            let message_type = raw
                .message_type
                .as_deref()
                .map(str::parse::<MessageType>)
                .transpose()
                .map_err(|e| self.invalid_row(&raw.code, e))?;
            let http_status_code = raw
                .http_status_code
                .map(u16::try_from)
                .transpose()
                .map_err(|_| self.invalid_row(&raw.code, "http_status_code out of range"))?;

            catalog.insert(
                raw.code,
                MessageTemplate {
                    message_type,
                    title: raw.title,
                    description: raw.description,
                    http_status_code,
                    hint: raw.hint,
                },
            );
        }

        debug!(codes = catalog.len(), "loaded catalog rows");
        Ok(catalog)
    }

    fn is_available(&self) -> bool {
        self.config.path.is_file() && self.open().is_ok()
    }
}

fn validate_table_name(table: &str) -> ResmsgResult<()> {
    let valid = !table.is_empty()
        && !table.starts_with(|c: char| c.is_ascii_digit())
        && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ResmsgError::Configuration {
            message: format!("invalid SQLite table name '{table}'"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed(dir: &TempDir, rows: &[&str]) -> PathBuf {
        let path = dir.path().join("catalog.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE messages (
                code TEXT PRIMARY KEY,
                type TEXT,
                title TEXT,
                description TEXT,
                http_status_code INTEGER,
                hint TEXT
            );",
        )
        .unwrap();
        for row in rows {
            conn.execute_batch(row).unwrap();
        }
        path
    }

    #[test]
    fn reads_rows_with_nulls_as_absent_fields() {
        let dir = TempDir::new().unwrap();
        let path = seed(
            &dir,
            &[
                "INSERT INTO messages VALUES ('CRUD_001', 'Success', 'Created', NULL, 201, NULL);",
                "INSERT INTO messages VALUES ('CRUD_002', NULL, 'Saved', NULL, NULL, NULL);",
            ],
        );

        let store = SqliteStore::new(SqliteStoreConfig::new(&path)).unwrap();
        assert!(store.is_available());

        let catalog = store.load().unwrap();
        assert_eq!(catalog["CRUD_001"].message_type, Some(MessageType::Success));
        assert_eq!(catalog["CRUD_001"].http_status_code, Some(201));
        assert_eq!(catalog["CRUD_002"].message_type, None);
        assert_eq!(catalog["CRUD_002"].description, None);
    }

    #[test]
    fn bad_type_is_reported_per_row() {
        let dir = TempDir::new().unwrap();
        let path = seed(
            &dir,
            &["INSERT INTO messages VALUES ('X', 'Fatal', 't', NULL, NULL, NULL);"],
        );
        let err = SqliteStore::new(SqliteStoreConfig::new(&path))
            .unwrap()
            .load()
            .unwrap_err();
        assert!(matches!(
            err,
            ResmsgError::Application(ApplicationError::InvalidMessageFile { ref reason, .. })
                if reason.contains("row 'X'")
        ));
    }

    #[test]
    fn missing_table_is_store_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = seed(&dir, &[]);
        let store = SqliteStore::new(SqliteStoreConfig {
            table: "other".into(),
            ..SqliteStoreConfig::new(&path)
        })
        .unwrap();
        assert!(matches!(
            store.load(),
            Err(ResmsgError::Application(ApplicationError::StoreUnavailable { .. }))
        ));
    }

    #[test]
    fn missing_database_is_not_available() {
        let dir = TempDir::new().unwrap();
        let store =
            SqliteStore::new(SqliteStoreConfig::new(dir.path().join("absent.db"))).unwrap();
        assert!(!store.is_available());
        assert!(store.load().is_err());
        // Read-only open must not create the file.
        assert!(!dir.path().join("absent.db").exists());
    }

    #[test]
    fn rejects_unsafe_table_names() {
        for table in ["", "1abc", "messages; DROP TABLE x", "a\"b"] {
            let config = SqliteStoreConfig {
                table: table.into(),
                ..SqliteStoreConfig::new("x.db")
            };
            assert!(SqliteStore::new(config).is_err(), "{table:?} accepted");
        }
    }
}
