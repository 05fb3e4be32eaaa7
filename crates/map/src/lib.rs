//! # Quakemap Map
//!
//! Composition of the earthquake map: three base tile layers, an earthquake
//! circle layer, a fault-line group that may still be empty when the map is
//! first shown, a layer control and a static magnitude legend.
//!
//! The composed [`QuakeMap`] renders to a self-contained Leaflet page
//! ([`render_index`]). Plate boundaries that arrive later are written as a
//! separate script ([`render_fault_lines_script`]) that the page loads into
//! the already displayed group, so the index is never rebuilt.

pub mod control;
pub mod error;
pub mod html;
pub mod layers;
pub mod legend;
pub mod map;
pub mod site;
pub mod tiles;

pub use control::{ControlPosition, LayerControl, LayerEntry, Overlay};
pub use error::{MapError, Result};
pub use html::{render_fault_lines_script, render_index};
pub use layers::{EarthquakeCircle, EarthquakeLayer, FaultLineGroup, FaultLineState, PathStyle};
pub use legend::{Legend, LegendRow};
pub use map::{MapConfig, MapView, QuakeMap};
pub use site::SiteWriter;
pub use tiles::{AccessToken, BaseMap, TileLayer};
