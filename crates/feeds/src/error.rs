//! Error types for feed retrieval.

use thiserror::Error;

/// Errors produced while fetching or decoding a feed.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("malformed feed at {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: quakemap_core::Error,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("unknown feed period: {0} (expected hour, day, week or month)")]
    UnknownPeriod(String),
}

/// Result alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
