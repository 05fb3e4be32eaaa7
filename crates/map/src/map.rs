//! Map composition.

use crate::control::{LayerControl, LayerEntry, Overlay};
use crate::layers::{EarthquakeLayer, FaultLineGroup};
use crate::legend::Legend;
use crate::tiles::{base_layers, AccessToken, BaseMap, TileLayer, MAX_ZOOM};

/// Initial viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
}

impl Default for MapView {
    /// Centred on the contiguous United States.
    fn default() -> Self {
        Self {
            lat: 37.09,
            lon: -95.71,
            zoom: 4,
        }
    }
}

/// Configuration for [`QuakeMap::compose`].
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub view: MapView,
    /// Tile-provider credential, passed through untouched.
    pub access_token: AccessToken,
    /// Shared maximum zoom of the base layers (default 18).
    pub max_zoom: u8,
    /// Base map active on load (default outdoor).
    pub default_base: BaseMap,
    /// Page title.
    pub title: String,
    /// File name of the script the page loads fault lines from.
    pub fault_line_script: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            view: MapView::default(),
            access_token: AccessToken::default(),
            max_zoom: MAX_ZOOM,
            default_base: BaseMap::default(),
            title: "Earthquakes and Tectonic Plates".to_string(),
            fault_line_script: "faultlines.js".to_string(),
        }
    }
}

/// A fully composed earthquake map.
///
/// The fault-line group is held by handle: whoever else holds a clone can
/// fill it after composition without touching the base layers or the
/// earthquake layer.
#[derive(Debug, Clone)]
pub struct QuakeMap {
    config: MapConfig,
    tiles: Vec<TileLayer>,
    earthquakes: Option<EarthquakeLayer>,
    fault_lines: FaultLineGroup,
    control: LayerControl,
    legend: Legend,
}

impl QuakeMap {
    /// Compose the map.
    ///
    /// `earthquakes` is `None` when the earthquake feed failed; the map is
    /// still valid and simply has no earthquake overlay. `fault_lines` may
    /// be empty.
    pub fn compose(
        config: &MapConfig,
        earthquakes: Option<EarthquakeLayer>,
        fault_lines: FaultLineGroup,
    ) -> Self {
        let tiles = base_layers(&config.access_token, config.max_zoom);

        let mut overlays = Vec::with_capacity(2);
        if earthquakes.is_some() {
            overlays.push(Overlay::Earthquakes);
        }
        overlays.push(Overlay::FaultLines);

        let control = LayerControl::new(&BaseMap::ALL, config.default_base, &overlays);

        Self {
            config: config.clone(),
            tiles,
            earthquakes,
            fault_lines,
            control,
            legend: Legend::new(),
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn view(&self) -> MapView {
        self.config.view
    }

    pub fn tiles(&self) -> &[TileLayer] {
        &self.tiles
    }

    pub fn tile_layer(&self, base: BaseMap) -> Option<&TileLayer> {
        self.tiles.iter().find(|t| t.base == base)
    }

    pub fn earthquakes(&self) -> Option<&EarthquakeLayer> {
        self.earthquakes.as_ref()
    }

    pub fn fault_lines(&self) -> &FaultLineGroup {
        &self.fault_lines
    }

    pub fn control(&self) -> &LayerControl {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut LayerControl {
        &mut self.control
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Layers currently shown: the active base plus every visible overlay.
    pub fn active_layers(&self) -> Vec<LayerEntry> {
        self.control
            .entries()
            .into_iter()
            .filter(|&e| self.control.is_visible(e))
            .collect()
    }
}
