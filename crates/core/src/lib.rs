//! # Quakemap Core
//!
//! Core types and GeoJSON parsing for the quakemap workspace.
//!
//! This crate provides:
//! - `Earthquake`: one event from the earthquake feed
//! - `PlateBoundary`: one fault-line geometry from the plate boundary feed
//! - GeoJSON wire models and conversion to and from `geo-types`

pub mod error;
pub mod geojson;
pub mod vector;

pub use error::{Error, Result};
pub use geojson::{geometry_to_geojson, parse_earthquakes, parse_plate_boundaries};
pub use vector::{Earthquake, PlateBoundary};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geojson::{parse_earthquakes, parse_plate_boundaries};
    pub use crate::vector::{Earthquake, PlateBoundary};
}
