//! TOML-based configuration for the triplifier.
//!
//! Supports a config file (triplifier.toml) with environment variable
//! expansion in paths.
//!
//! Example configuration:
//! ```toml
//! [store]
//! path = "${HOME}/triplifier/projects.db"
//! key_prefix = "triplifier"
//!
//! [simplifier]
//! format = "DwCA"
//! main_table = "maintable"
//! id_column = "id"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Project store configuration.
    pub store: StoreSettings,

    /// Schema simplifier configuration.
    pub simplifier: SimplifierSettings,
}

/// Project store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the SQLite database (supports ${ENV_VAR} expansion).
    ///
    /// Defaults to `<data_dir>/triplifier/projects.db`.
    pub path: Option<String>,

    /// Prefix of every storage key.
    pub key_prefix: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: None,
            key_prefix: "triplifier".to_string(),
        }
    }
}

impl StoreSettings {
    /// Resolve the database path, expanding environment variables.
    ///
    /// Returns `None` when no path is configured and the platform has no
    /// data directory.
    pub fn resolved_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        match &self.path {
            Some(path) => Ok(Some(PathBuf::from(expand_env_vars(path)?))),
            None => Ok(dirs::data_dir().map(|dir| dir.join("triplifier").join("projects.db"))),
        }
    }
}

/// Schema simplifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimplifierSettings {
    /// Default simplifier format code.
    pub format: String,

    /// Name of the central table of an archive-derived schema.
    pub main_table: String,

    /// Row identifier column of dedicated tables.
    pub id_column: String,
}

impl Default for SimplifierSettings {
    fn default() -> Self {
        Self {
            format: "DwCA".to_string(),
            main_table: "maintable".to_string(),
            id_column: "id".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `TRIPLIFIER_CONFIG`
    /// 2. `./triplifier.toml`
    /// 3. `~/.config/triplifier/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("TRIPLIFIER_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("triplifier.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("triplifier").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.store.key_prefix.is_empty() {
            return Err(SettingsError::InvalidConfig(
                "store.key_prefix must not be empty".to_string(),
            ));
        }
        if self.simplifier.main_table.is_empty() || self.simplifier.id_column.is_empty() {
            return Err(SettingsError::InvalidConfig(
                "simplifier.main_table and simplifier.id_column must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if !(ch.is_alphanumeric() || ch == '_') {
                    break;
                }
                var_name.push(ch);
                chars.next();
            }
            if var_name.is_empty() {
                // Lone `$`
                result.push('$');
                continue;
            }
        }

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name))?;
        result.push_str(&value);
    }

    Ok(result)
}
