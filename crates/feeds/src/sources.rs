//! Feed endpoints.
//!
//! The earthquake feed is one of the USGS summary feeds (all magnitudes,
//! windowed by period) or any custom URL serving the same schema.

use std::fmt;
use std::str::FromStr;

use crate::error::FeedError;

/// Root of the USGS GeoJSON summary feeds.
pub const USGS_SUMMARY_BASE: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// PB2002 tectonic plate polygons.
pub const PLATE_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_plates.json";

/// Server-side window of a USGS summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedPeriod {
    Hour,
    Day,
    #[default]
    Week,
    Month,
}

impl FeedPeriod {
    pub const ALL: [FeedPeriod; 4] = [Self::Hour, Self::Day, Self::Week, Self::Month];

    fn slug(&self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for FeedPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for FeedPeriod {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hour" | "h" => Ok(Self::Hour),
            "day" | "d" => Ok(Self::Day),
            "week" | "w" => Ok(Self::Week),
            "month" | "m" => Ok(Self::Month),
            other => Err(FeedError::UnknownPeriod(other.to_string())),
        }
    }
}

/// Where to fetch earthquakes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// USGS "all earthquakes" summary feed for the given period.
    Usgs(FeedPeriod),
    /// Any URL returning a GeoJSON FeatureCollection of point events.
    Custom(String),
}

impl Default for FeedSource {
    fn default() -> Self {
        Self::Usgs(FeedPeriod::default())
    }
}

impl FeedSource {
    /// Full request URL.
    pub fn url(&self) -> String {
        match self {
            Self::Usgs(period) => format!("{}/all_{}.geojson", USGS_SUMMARY_BASE, period),
            Self::Custom(url) => url.clone(),
        }
    }
}
