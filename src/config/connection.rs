//! Source database connection parameters.
//!
//! These are recorded on a project as reported by the inspection service and
//! passed through unchanged to the mapping output.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Error type for connection parameters.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Unsupported database system: {0}. Supported: mysql, postgresql, oracle, sqlserver, sqlite")]
    UnsupportedSystem(String),

    #[error("Incomplete connection: {0}")]
    Incomplete(&'static str),
}

/// Supported source database systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbSystem {
    MySql,
    PostgreSql,
    Oracle,
    SqlServer,
    Sqlite,
}

impl DbSystem {
    /// Parse a system name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConnectionError> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(DbSystem::MySql),
            "postgresql" | "postgres" => Ok(DbSystem::PostgreSql),
            "oracle" => Ok(DbSystem::Oracle),
            "sqlserver" | "mssql" => Ok(DbSystem::SqlServer),
            "sqlite" => Ok(DbSystem::Sqlite),
            other => Err(ConnectionError::UnsupportedSystem(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DbSystem::MySql => "mysql",
            DbSystem::PostgreSql => "postgresql",
            DbSystem::Oracle => "oracle",
            DbSystem::SqlServer => "sqlserver",
            DbSystem::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for DbSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection parameters of a project's source database.
///
/// Every field is optional on the wire; a freshly created project has an
/// empty connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<DbSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ConnectionParams {
    /// Connection to a server database.
    pub fn server(system: DbSystem, host: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            system: Some(system),
            host: Some(host.into()),
            database: Some(database.into()),
            ..Default::default()
        }
    }

    /// Connection to an uploaded data file converted to SQLite.
    ///
    /// The host is the file's directory (with forward slashes) and the
    /// database is the file name.
    pub fn sqlite(path: &Path) -> Self {
        let host = path
            .parent()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        let database = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            system: Some(DbSystem::Sqlite),
            host: Some(host),
            database: Some(database),
            ..Default::default()
        }
    }

    /// Builder: set credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Is nothing set?
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// JDBC URL for this connection.
    pub fn jdbc_url(&self) -> Result<String, ConnectionError> {
        let system = self.system.ok_or(ConnectionError::Incomplete("system"))?;
        let host = self.host.as_deref().ok_or(ConnectionError::Incomplete("host"))?;
        let database = self
            .database
            .as_deref()
            .ok_or(ConnectionError::Incomplete("database"))?;

        Ok(match system {
            DbSystem::MySql => format!("jdbc:mysql://{}/{}", host, database),
            DbSystem::PostgreSql => format!("jdbc:postgresql://{}/{}", host, database),
            DbSystem::Oracle => format!("jdbc:oracle:thin:@{}:{}", host, database),
            DbSystem::SqlServer => format!("jdbc:sqlserver://{};databaseName={}", host, database),
            DbSystem::Sqlite => format!("jdbc:sqlite:{}/{}", host, database),
        })
    }
}
