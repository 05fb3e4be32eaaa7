//! Leaflet page rendering.
//!
//! The page template is bundled into the binary. The composed map is
//! serialized into a JSON model embedded in the page; the template's glue
//! script turns it into Leaflet layers. Fault lines are shipped separately
//! as a script calling `window.quakemapAddFaultLines(..)`, which the page
//! loads after the map is on screen.

use quakemap_colormap::escape_html;
use quakemap_core::geometry_to_geojson;
use serde::Serialize;
use serde_json::{json, Value};

use crate::control::{ControlPosition, LayerEntry, Overlay};
use crate::error::Result;
use crate::layers::{FaultLineGroup, PathStyle};
use crate::map::QuakeMap;

const INDEX_TEMPLATE: &str = include_str!("../assets/index.html");

// ---------------------------------------------------------------------------
// Page model
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageModel<'a> {
    center: [f64; 2],
    zoom: u8,
    base_layers: Vec<BaseLayerModel<'a>>,
    active_base: &'static str,
    earthquakes: Option<EarthquakeModel>,
    fault_lines: FaultLineModel<'a>,
    control: ControlModel,
    legend: LegendModel,
}

#[derive(Serialize)]
struct BaseLayerModel<'a> {
    name: &'static str,
    url: &'a str,
    options: TileOptions<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions<'a> {
    attribution: &'a str,
    max_zoom: u8,
    zoom_offset: i8,
    id: &'a str,
    access_token: &'a str,
}

#[derive(Serialize)]
struct EarthquakeModel {
    name: &'static str,
    visible: bool,
    circles: Vec<CircleModel>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CircleModel {
    lat: f64,
    lng: f64,
    radius: f64,
    color: String,
    fill_opacity: f64,
    popup: String,
}

#[derive(Serialize)]
struct FaultLineModel<'a> {
    name: &'static str,
    visible: bool,
    style: &'a PathStyle,
    script: &'a str,
}

#[derive(Serialize)]
struct ControlModel {
    collapsed: bool,
    position: ControlPosition,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LegendModel {
    position: ControlPosition,
    class_name: &'static str,
    html: String,
}

fn page_model(map: &QuakeMap) -> PageModel<'_> {
    let control = map.control();
    let config = map.config();

    let base_layers = map
        .tiles()
        .iter()
        .map(|t| BaseLayerModel {
            name: t.name(),
            url: &t.url_template,
            options: TileOptions {
                attribution: &t.attribution,
                max_zoom: t.max_zoom,
                zoom_offset: t.zoom_offset,
                id: &t.style_id,
                access_token: t.access_token.expose(),
            },
        })
        .collect();

    let earthquakes = map.earthquakes().map(|layer| EarthquakeModel {
        name: Overlay::Earthquakes.name(),
        visible: control.is_visible(LayerEntry::Overlay(Overlay::Earthquakes)),
        circles: layer
            .circles()
            .iter()
            .map(|c| CircleModel {
                lat: c.lat,
                lng: c.lon,
                radius: c.style.radius,
                color: c.style.color.css(),
                fill_opacity: c.style.fill_opacity,
                popup: c.popup.clone(),
            })
            .collect(),
    });

    let legend = map.legend();

    PageModel {
        center: [config.view.lat, config.view.lon],
        zoom: config.view.zoom,
        base_layers,
        active_base: control.active_base().name(),
        earthquakes,
        fault_lines: FaultLineModel {
            name: Overlay::FaultLines.name(),
            visible: control.is_visible(LayerEntry::Overlay(Overlay::FaultLines)),
            style: map.fault_lines().style(),
            script: &config.fault_line_script,
        },
        control: ControlModel {
            collapsed: control.collapsed(),
            position: control.position(),
        },
        legend: LegendModel {
            position: legend.position(),
            class_name: legend.class_name(),
            html: legend.to_html(),
        },
    }
}

/// JSON safe to place inside a `<script>` element.
fn script_safe_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render the map page.
///
/// The fault-line group is not embedded: the page always starts with an
/// empty group and fills it from the fault-line script.
pub fn render_index(map: &QuakeMap) -> Result<String> {
    let model = script_safe_json(&page_model(map))?;
    Ok(INDEX_TEMPLATE
        .replace("{{TITLE}}", &escape_html(&map.config().title))
        .replace("{{MODEL}}", &model))
}

/// GeoJSON FeatureCollection of the group's current boundaries.
pub fn fault_lines_geojson(group: &FaultLineGroup) -> Value {
    let features: Vec<Value> = group.with_boundaries(|boundaries| {
        boundaries
            .iter()
            .filter_map(|b| {
                let mut feature = geometry_to_geojson(&b.geometry)?;
                if let Some(name) = &b.name {
                    feature["properties"]["name"] = Value::String(name.clone());
                }
                Some(feature)
            })
            .collect()
    });
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Render the script that adds the group's boundaries to a displayed page.
pub fn render_fault_lines_script(group: &FaultLineGroup) -> Result<String> {
    let data = script_safe_json(&fault_lines_geojson(group))?;
    Ok(format!("window.quakemapAddFaultLines({});\n", data))
}
