//! Error types shared across the mapping model and its input documents.
//!
//! Broken references between collections are not errors: the project repairs
//! them by cascading deletions. These types cover caller mistakes and
//! malformed input.

use std::path::PathBuf;

/// Errors raised by the project model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Unknown project property: {0}")]
    UnknownProperty(String),

    #[error("Invalid value for property {property}: {source}")]
    InvalidPropertyJson {
        property: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Project JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while reading inspection or vocabulary documents.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for input loading.
pub type InputResult<T> = Result<T, InputError>;

impl InputError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InputError::Io {
            path: path.into(),
            source,
        }
    }
}
