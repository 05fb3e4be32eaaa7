//! Error types for map composition and page output.

use thiserror::Error;

/// Errors produced while composing or writing the map.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("layer not in control: {0}")]
    UnknownLayer(String),
}

/// Result alias for map operations.
pub type Result<T> = std::result::Result<T, MapError>;
