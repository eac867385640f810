//! SQLite-based project store.
//!
//! Projects are persisted one property per record, so a change to a single
//! collection rewrites a single value. The store lives in
//! `<data_dir>/triplifier/projects.db` unless configured otherwise.
//!
//! # Design
//!
//! - Simple key-value store with JSON values
//! - Versioned - auto-clears on version mismatch
//!
//! # Key Format
//!
//! ```text
//! {prefix}.projects                    -> ["survey", "survey.1", ...]
//! {prefix}.{property}.{project}        -> JSON value of the property
//! ```

mod manager;

pub use manager::{PersistenceObserver, ProjectManager, ProjectManagerObserver};

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::config::{SettingsError, StoreSettings};
use crate::error::ModelError;
use crate::project::PropertyName;

/// Current store schema version. Bump this when the record format changes.
const STORE_VERSION: i32 = 1;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to determine data directory")]
    NoDataDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Project not found: {0}")]
    UnknownProject(String),

    #[error("Project already exists: {0}")]
    ProjectExists(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Builds the storage keys of a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKey {
    prefix: String,
}

impl StorageKey {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Key for the list of project names.
    pub fn projects(&self) -> String {
        format!("{}.projects", self.prefix)
    }

    /// Key for one property of one project.
    pub fn property(&self, property: PropertyName, project: &str) -> String {
        format!("{}.{}.{}", self.prefix, property.as_str(), project)
    }
}

/// SQLite-based key/value store for projects.
pub struct ProjectStore {
    conn: Connection,
    keys: StorageKey,
}

impl ProjectStore {
    /// Open or create the store configured by `settings`.
    ///
    /// If the store version doesn't match, it's automatically cleared.
    pub fn open(settings: &StoreSettings) -> StoreResult<Self> {
        let path = settings.resolved_path()?.ok_or(StoreError::NoDataDir)?;
        Self::open_path(&path, &settings.key_prefix)
    }

    /// Open or create a store at `path`.
    pub fn open_path(path: &Path, prefix: &str) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self {
            conn,
            keys: StorageKey::new(prefix),
        };
        store.init()?;

        info!(path = %path.display(), "opened project store");
        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory(prefix: &str) -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn,
            keys: StorageKey::new(prefix),
        };
        store.init()?;
        Ok(store)
    }

    pub fn keys(&self) -> &StorageKey {
        &self.keys
    }

    fn init(&self) -> StoreResult<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;

        let stored_version: Option<i32> = self
            .conn
            .query_row("SELECT value FROM meta WHERE key = 'version'", [], |row| {
                let s: String = row.get(0)?;
                Ok(s.parse().unwrap_or(0))
            })
            .optional()?;

        match stored_version {
            Some(v) if v == STORE_VERSION => {}
            Some(_) => {
                self.clear_all()?;
                self.set_version()?;
            }
            None => self.set_version()?,
        }

        Ok(())
    }

    fn set_version(&self) -> StoreResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES ('version', ?)",
            params![STORE_VERSION.to_string()],
        )?;
        Ok(())
    }

    /// Get a value from the store.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM store WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the store.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO store (key, value) VALUES (?, ?)",
            params![key, json],
        )?;
        Ok(())
    }

    /// Delete a value from the store.
    pub fn delete(&self, key: &str) -> StoreResult<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM store WHERE key = ?", params![key])?;
        Ok(rows > 0)
    }

    /// Delete all entries whose key starts with `prefix`.
    pub fn delete_prefix(&self, prefix: &str) -> StoreResult<usize> {
        let rows = self.conn.execute(
            "DELETE FROM store WHERE key LIKE ? ESCAPE '\\'",
            params![like_prefix(prefix)],
        )?;
        Ok(rows)
    }

    /// List all keys starting with `prefix`, sorted.
    pub fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM store WHERE key LIKE ? ESCAPE '\\' ORDER BY key")?;
        let keys = stmt
            .query_map(params![like_prefix(prefix)], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// Clear all entries (but keep metadata).
    pub fn clear_all(&self) -> StoreResult<()> {
        self.conn.execute("DELETE FROM store", [])?;
        Ok(())
    }

    /// Number of stored entries.
    pub fn len(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM store", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl std::fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore")
            .field("prefix", &self.keys.prefix())
            .finish()
    }
}

/// A LIKE pattern matching keys that start with `prefix` literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
