//! Blocking (synchronous) API.
//!
//! Wraps the async [`FeedClient`] with a Tokio runtime so callers don't need
//! to manage their own async runtime. Must not be called from inside an
//! async context.

use quakemap_core::{Earthquake, PlateBoundary};

use crate::error::{FeedError, Result};
use crate::http::{FeedClient, FeedClientOptions};

/// Blocking wrapper around [`FeedClient`].
///
/// Uses an internal single-threaded Tokio runtime.
pub struct FeedClientBlocking {
    rt: tokio::runtime::Runtime,
    inner: FeedClient,
}

impl FeedClientBlocking {
    /// Create a blocking client.
    pub fn new(options: FeedClientOptions) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| FeedError::Network(e.to_string()))?;
        let inner = FeedClient::new(options)?;
        Ok(Self { rt, inner })
    }

    /// Fetch an earthquake feed (blocking).
    pub fn fetch_earthquakes(&self, url: &str) -> Result<Vec<Earthquake>> {
        self.rt.block_on(self.inner.fetch_earthquakes(url))
    }

    /// Fetch a plate boundary feed (blocking).
    pub fn fetch_plate_boundaries(&self, url: &str) -> Result<Vec<PlateBoundary>> {
        self.rt.block_on(self.inner.fetch_plate_boundaries(url))
    }

    /// Fetch both feeds concurrently (blocking until both settle).
    pub fn fetch_both(
        &self,
        quakes_url: &str,
        faults_url: &str,
    ) -> (Result<Vec<Earthquake>>, Result<Vec<PlateBoundary>>) {
        self.rt.block_on(self.inner.fetch_both(quakes_url, faults_url))
    }
}
