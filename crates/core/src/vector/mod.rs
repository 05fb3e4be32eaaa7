//! Vector feature types consumed by the map layers

use geo_types::{Geometry, Point};

/// One earthquake event from the earthquake feed.
///
/// Records are transient: they are parsed from a feed response and consumed
/// while the earthquake layer is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Earthquake {
    /// Epicentre as (x = longitude, y = latitude)
    pub position: Point<f64>,
    /// Hypocentre depth in kilometres, when the feed reports a third coordinate
    pub depth_km: Option<f64>,
    /// Magnitude, may be negative or fractional; `None` when the feed reports `null`
    pub magnitude: Option<f64>,
    /// Human-readable place label
    pub place: Option<String>,
    /// Event time in epoch milliseconds
    pub time_ms: Option<i64>,
    /// Feed identifier
    pub id: Option<String>,
}

impl Earthquake {
    /// Create an event at the given longitude/latitude with no attributes.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            position: Point::new(lon, lat),
            depth_km: None,
            magnitude: None,
            place: None,
            time_ms: None,
            id: None,
        }
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    pub fn with_time_ms(mut self, time_ms: i64) -> Self {
        self.time_ms = Some(time_ms);
        self
    }

    /// Latitude in degrees
    pub fn lat(&self) -> f64 {
        self.position.y()
    }

    /// Longitude in degrees
    pub fn lon(&self) -> f64 {
        self.position.x()
    }

    /// Magnitude as seen by the visual encoding.
    ///
    /// A `null` magnitude encodes as `0.0`: lowest band, zero radius.
    pub fn encoded_magnitude(&self) -> f64 {
        self.magnitude.unwrap_or(0.0)
    }
}

/// One plate boundary path from the fault-line feed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateBoundary {
    /// Line or polygon geometry
    pub geometry: Geometry<f64>,
    /// Plate name or code, if the feed carries one
    pub name: Option<String>,
}

impl PlateBoundary {
    pub fn new(geometry: Geometry<f64>) -> Self {
        Self {
            geometry,
            name: None,
        }
    }

    /// Total number of coordinate pairs in the geometry.
    pub fn coord_count(&self) -> usize {
        use geo_types::Geometry as G;
        match &self.geometry {
            G::LineString(ls) => ls.0.len(),
            G::MultiLineString(mls) => mls.0.iter().map(|ls| ls.0.len()).sum(),
            G::Polygon(p) => {
                p.exterior().0.len() + p.interiors().iter().map(|r| r.0.len()).sum::<usize>()
            }
            G::MultiPolygon(mp) => mp
                .0
                .iter()
                .map(|p| {
                    p.exterior().0.len() + p.interiors().iter().map(|r| r.0.len()).sum::<usize>()
                })
                .sum(),
            _ => 0,
        }
    }
}
