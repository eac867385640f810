//! Configuration module for the triplifier.
//!
//! Handles settings files, environment variables, and source connection
//! parameters.

mod connection;
mod settings;

pub use connection::{ConnectionError, ConnectionParams, DbSystem};
pub use settings::{expand_env_vars, Settings, SettingsError, SimplifierSettings, StoreSettings};
