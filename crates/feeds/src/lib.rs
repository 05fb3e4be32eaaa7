//! # Quakemap Feeds
//!
//! Async client for the two public GeoJSON feeds: recent earthquakes and
//! tectonic plate boundaries.
//!
//! Requests are independent. [`FeedClient::fetch_both`] keeps both in
//! flight at once and returns each outcome separately, so one feed failing
//! never hides the other. Defaults issue exactly one attempt per feed with
//! no timeout; both can be configured through [`FeedClientOptions`].

pub mod blocking;
pub mod error;
pub mod http;
pub mod sources;

pub use error::{FeedError, Result};
pub use http::{FeedClient, FeedClientOptions};
pub use sources::{FeedPeriod, FeedSource, PLATE_BOUNDARIES_URL, USGS_SUMMARY_BASE};
