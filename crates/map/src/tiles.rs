//! Base map tile layers.
//!
//! Three mutually exclusive Mapbox styles. URL templates and the access
//! token are handed to the renderer as-is; nothing here parses or validates
//! them. A missing or invalid token only means the tiles fail to load.

use std::fmt;

/// Highest zoom level offered by every base layer.
pub const MAX_ZOOM: u8 = 18;

const MAPBOX_ATTRIBUTION: &str = "© <a href='https://www.mapbox.com/about/maps/'>Mapbox</a> \
     © <a href='http://www.openstreetmap.org/copyright'>OpenStreetMap</a> \
     <strong><a href='https://www.mapbox.com/map-feedback/' target='_blank'>Improve this map</a></strong>";

const OSM_IMAGERY_ATTRIBUTION: &str = "Map data &copy; <a href=\"https://www.openstreetmap.org/\">OpenStreetMap</a> contributors, \
     <a href=\"https://creativecommons.org/licenses/by-sa/2.0/\">CC-BY-SA</a>, \
     Imagery © <a href=\"https://www.mapbox.com/\">Mapbox</a>";

const STYLES_URL: &str =
    "https://api.mapbox.com/styles/v1/{id}/tiles/{z}/{x}/{y}?access_token={accessToken}";

const RASTER_URL: &str =
    "https://api.tiles.mapbox.com/v4/{id}/{z}/{x}/{y}.png?access_token={accessToken}";

/// Opaque map-provider credential.
///
/// Supplied externally and passed through untouched. `Debug` never prints
/// the value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for embedding in tile requests.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("AccessToken(<empty>)")
        } else {
            f.write_str("AccessToken(<redacted>)")
        }
    }
}

/// The three base map choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BaseMap {
    #[default]
    Outdoor,
    Grayscale,
    Satellite,
}

impl BaseMap {
    /// Control order: outdoor, greyscale, satellite.
    pub const ALL: [BaseMap; 3] = [Self::Outdoor, Self::Grayscale, Self::Satellite];

    /// Name shown in the layer control.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Outdoor => "Outdoor Map",
            Self::Grayscale => "Greyscale Map",
            Self::Satellite => "Satellite Map",
        }
    }

    /// Provider style identifier substituted for `{id}`.
    pub fn style_id(&self) -> &'static str {
        match self {
            Self::Outdoor => "mapbox/streets-v11",
            Self::Grayscale => "mapbox.light",
            Self::Satellite => "mapbox.satellite",
        }
    }

    fn url_template(&self) -> &'static str {
        match self {
            Self::Outdoor => STYLES_URL,
            Self::Grayscale | Self::Satellite => RASTER_URL,
        }
    }

    fn attribution(&self) -> &'static str {
        match self {
            Self::Outdoor => MAPBOX_ATTRIBUTION,
            Self::Grayscale | Self::Satellite => OSM_IMAGERY_ATTRIBUTION,
        }
    }

    /// Build the tile layer for this style.
    pub fn tile_layer(&self, token: &AccessToken, max_zoom: u8) -> TileLayer {
        TileLayer {
            base: *self,
            url_template: self.url_template().to_string(),
            attribution: self.attribution().to_string(),
            max_zoom,
            zoom_offset: 0,
            style_id: self.style_id().to_string(),
            access_token: token.clone(),
        }
    }
}

impl fmt::Display for BaseMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A templated raster tile layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub base: BaseMap,
    /// Template with `{id}`, `{z}`, `{x}`, `{y}` and `{accessToken}` placeholders.
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
    pub zoom_offset: i8,
    pub style_id: String,
    pub access_token: AccessToken,
}

impl TileLayer {
    pub fn name(&self) -> &'static str {
        self.base.name()
    }
}

/// Tile layers for every base map, in control order.
pub fn base_layers(token: &AccessToken, max_zoom: u8) -> Vec<TileLayer> {
    BaseMap::ALL
        .iter()
        .map(|b| b.tile_layer(token, max_zoom))
        .collect()
}
