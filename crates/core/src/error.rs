//! Error types for quakemap

use thiserror::Error;

/// Main error type for feature parsing and conversion
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a GeoJSON FeatureCollection, got {found}")]
    NotAFeatureCollection { found: String },

    #[error("Invalid position: {reason}")]
    InvalidPosition { reason: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for quakemap core operations
pub type Result<T> = std::result::Result<T, Error>;
