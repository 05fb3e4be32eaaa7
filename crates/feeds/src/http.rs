//! HTTP client for GeoJSON feeds.

use std::time::Duration;

use quakemap_core::{parse_earthquakes, parse_plate_boundaries, Earthquake, PlateBoundary};
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{FeedError, Result};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for [`FeedClient`].
#[derive(Debug, Clone)]
pub struct FeedClientOptions {
    /// Per-request timeout (default: none).
    pub request_timeout: Option<Duration>,
    /// Retries after a failed attempt (default 0: one attempt per feed).
    pub max_retries: u32,
    /// `User-Agent` header sent with each request.
    pub user_agent: String,
}

impl Default for FeedClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: None,
            max_retries: 0,
            user_agent: format!("quakemap/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Async client for the earthquake and plate boundary feeds.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    options: FeedClientOptions,
}

impl FeedClient {
    /// Create a new feed client.
    pub fn new(options: FeedClientOptions) -> Result<Self> {
        let mut builder = Client::builder().user_agent(options.user_agent.clone());
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FeedError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, options })
    }

    /// The options this client was built with.
    pub fn options(&self) -> &FeedClientOptions {
        &self.options
    }

    /// Fetch and parse an earthquake feed.
    pub async fn fetch_earthquakes(&self, url: &str) -> Result<Vec<Earthquake>> {
        let body = self.get_text(url).await?;
        let quakes = parse_earthquakes(&body).map_err(|source| FeedError::Parse {
            url: url.to_string(),
            source,
        })?;
        debug!("{} earthquakes from {}", quakes.len(), url);
        Ok(quakes)
    }

    /// Fetch and parse a plate boundary feed.
    pub async fn fetch_plate_boundaries(&self, url: &str) -> Result<Vec<PlateBoundary>> {
        let body = self.get_text(url).await?;
        let plates = parse_plate_boundaries(&body).map_err(|source| FeedError::Parse {
            url: url.to_string(),
            source,
        })?;
        debug!("{} plate boundaries from {}", plates.len(), url);
        Ok(plates)
    }

    /// Fetch both feeds concurrently.
    ///
    /// Both requests are in flight at the same time and neither waits on the
    /// other's outcome; each result is returned as-is.
    pub async fn fetch_both(
        &self,
        quakes_url: &str,
        faults_url: &str,
    ) -> (Result<Vec<Earthquake>>, Result<Vec<PlateBoundary>>) {
        futures::join!(
            self.fetch_earthquakes(quakes_url),
            self.fetch_plate_boundaries(faults_url)
        )
    }

    // ── Private helpers ─────────────────────────────────────────────

    async fn get_text(&self, url: &str) -> Result<String> {
        let mut last_err = None;

        for attempt in 0..=self.options.max_retries {
            if attempt > 0 {
                // Exponential backoff: 500ms, 1s, 2s, ...
                let delay = Duration::from_millis(500 * (1 << (attempt - 1).min(6)));
                tokio::time::sleep(delay).await;
            }

            match self.client.get(url).send().await {
                Ok(r) if r.status().is_success() => {
                    return Ok(r.text().await?);
                }
                Ok(r) => {
                    let status = r.status();
                    last_err = Some(FeedError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                    // Don't retry client errors (4xx)
                    if status.is_client_error() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("request to {} failed (attempt {}): {}", url, attempt + 1, e);
                    last_err = Some(FeedError::Http(e));
                }
            }
        }

        Err(last_err.unwrap_or_else(|| FeedError::Network(format!("no attempt made for {url}"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_make_one_attempt_without_timeout() {
        let opts = FeedClientOptions::default();
        assert_eq!(opts.max_retries, 0);
        assert!(opts.request_timeout.is_none());
        assert!(opts.user_agent.starts_with("quakemap/"));
    }

    #[test]
    fn client_builds_with_timeout() {
        let opts = FeedClientOptions {
            request_timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        let client = FeedClient::new(opts).unwrap();
        assert_eq!(client.options().request_timeout, Some(Duration::from_secs(5)));
    }
}
