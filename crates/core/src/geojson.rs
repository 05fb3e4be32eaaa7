//! GeoJSON wire models and conversion to `geo-types`.
//!
//! Lightweight serde models covering the subset of RFC 7946 used by the two
//! feeds: a FeatureCollection of point events and a FeatureCollection of
//! line/polygon boundaries. Geometries are parsed per feature so one bad
//! record does not reject the whole document.

use geo_types::{
    Coord, Geometry, LineString, MultiLineString, MultiPolygon, Point, Polygon,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::vector::{Earthquake, PlateBoundary};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// A GeoJSON FeatureCollection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(default)]
    pub features: Vec<Feature>,
}

/// A GeoJSON Feature with its geometry kept raw until conversion.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(default)]
    pub geometry: Option<Value>,

    #[serde(default)]
    pub properties: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl Feature {
    fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }

    fn string_property(&self, key: &str) -> Option<String> {
        self.property(key).and_then(Value::as_str).map(str::to_string)
    }
}

/// A GeoJSON geometry, tagged by its `type` member.
///
/// Positions are kept as `Vec<f64>` because the earthquake feed carries a
/// third (depth) ordinate.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: Vec<f64> },
    LineString { coordinates: Vec<Vec<f64>> },
    MultiLineString { coordinates: Vec<Vec<Vec<f64>>> },
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn parse_collection(body: &str) -> Result<FeatureCollection> {
    let col: FeatureCollection = serde_json::from_str(body)?;
    if col.type_ != "FeatureCollection" {
        return Err(Error::NotAFeatureCollection { found: col.type_ });
    }
    Ok(col)
}

/// Parse an earthquake feed document.
///
/// Features without a usable Point geometry are skipped.
pub fn parse_earthquakes(body: &str) -> Result<Vec<Earthquake>> {
    let col = parse_collection(body)?;
    let total = col.features.len();

    let mut out = Vec::with_capacity(total);
    for feature in &col.features {
        match earthquake_from_feature(feature) {
            Ok(eq) => out.push(eq),
            Err(e) => debug!("skipping earthquake feature: {}", e),
        }
    }

    debug!("parsed {} of {} earthquake features", out.len(), total);
    Ok(out)
}

/// Parse a plate boundary document.
///
/// Features whose geometry is missing or not a line/polygon are skipped.
pub fn parse_plate_boundaries(body: &str) -> Result<Vec<PlateBoundary>> {
    let col = parse_collection(body)?;
    let total = col.features.len();

    let mut out = Vec::with_capacity(total);
    for feature in &col.features {
        match boundary_from_feature(feature) {
            Ok(b) => out.push(b),
            Err(e) => debug!("skipping boundary feature: {}", e),
        }
    }

    debug!("parsed {} of {} plate boundary features", out.len(), total);
    Ok(out)
}

fn wire_geometry(feature: &Feature) -> Result<GeoJsonGeometry> {
    let raw = feature
        .geometry
        .clone()
        .ok_or_else(|| Error::Other("feature has no geometry".into()))?;
    Ok(serde_json::from_value(raw)?)
}

fn earthquake_from_feature(feature: &Feature) -> Result<Earthquake> {
    let coords = match wire_geometry(feature)? {
        GeoJsonGeometry::Point { coordinates } => coordinates,
        _ => return Err(Error::Other("earthquake geometry is not a Point".into())),
    };
    let c = coord(&coords)?;

    let time_ms = feature.property("time").and_then(|v| {
        v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
    });
    let id = match &feature.id {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    Ok(Earthquake {
        position: Point(c),
        depth_km: coords.get(2).copied(),
        magnitude: feature.property("mag").and_then(Value::as_f64),
        place: feature.string_property("place"),
        time_ms,
        id,
    })
}

fn boundary_from_feature(feature: &Feature) -> Result<PlateBoundary> {
    let geometry = match wire_geometry(feature)? {
        GeoJsonGeometry::Point { .. } => {
            return Err(Error::Other("plate boundary geometry is a Point".into()))
        }
        other => to_geo(&other)?,
    };
    let name = feature
        .string_property("PlateName")
        .or_else(|| feature.string_property("Name"))
        .or_else(|| feature.string_property("Code"));
    Ok(PlateBoundary { geometry, name })
}

fn coordinates_prefix(p: &[f64]) -> Result<[f64; 2]> {
    match p {
        [x, y, ..] => Ok([*x, *y]),
        _ => Err(Error::InvalidPosition {
            reason: format!("expected at least 2 ordinates, got {}", p.len()),
        }),
    }
}

fn coord(p: &[f64]) -> Result<Coord<f64>> {
    let [x, y] = coordinates_prefix(p)?;
    if !x.is_finite() || !y.is_finite() {
        return Err(Error::InvalidPosition {
            reason: format!("non-finite ordinate ({x}, {y})"),
        });
    }
    Ok(Coord { x, y })
}

fn line(points: &[Vec<f64>]) -> Result<LineString<f64>> {
    points
        .iter()
        .map(|p| coord(p))
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

fn polygon(rings: &[Vec<Vec<f64>>]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|r| line(r));
    let exterior = rings
        .next()
        .ok_or_else(|| Error::Other("polygon has no rings".into()))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn to_geo(g: &GeoJsonGeometry) -> Result<Geometry<f64>> {
    Ok(match g {
        GeoJsonGeometry::Point { coordinates } => Geometry::Point(Point(coord(coordinates)?)),
        GeoJsonGeometry::LineString { coordinates } => Geometry::LineString(line(coordinates)?),
        GeoJsonGeometry::MultiLineString { coordinates } => Geometry::MultiLineString(
            MultiLineString::new(coordinates.iter().map(|l| line(l)).collect::<Result<_>>()?),
        ),
        GeoJsonGeometry::Polygon { coordinates } => Geometry::Polygon(polygon(coordinates)?),
        GeoJsonGeometry::MultiPolygon { coordinates } => Geometry::MultiPolygon(
            MultiPolygon::new(coordinates.iter().map(|p| polygon(p)).collect::<Result<_>>()?),
        ),
    })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn ring(ls: &LineString<f64>) -> Vec<Vec<f64>> {
    ls.0.iter().map(|c| vec![c.x, c.y]).collect()
}

fn rings(p: &Polygon<f64>) -> Vec<Vec<Vec<f64>>> {
    std::iter::once(p.exterior())
        .chain(p.interiors())
        .map(ring)
        .collect()
}

/// Convert a geometry to its GeoJSON wire form.
///
/// Returns `None` for geometry kinds the feeds never carry (rects, triangles,
/// collections, multipoints).
pub fn to_wire(g: &Geometry<f64>) -> Option<GeoJsonGeometry> {
    Some(match g {
        Geometry::Point(p) => GeoJsonGeometry::Point {
            coordinates: vec![p.x(), p.y()],
        },
        Geometry::LineString(ls) => GeoJsonGeometry::LineString {
            coordinates: ring(ls),
        },
        Geometry::MultiLineString(mls) => GeoJsonGeometry::MultiLineString {
            coordinates: mls.0.iter().map(ring).collect(),
        },
        Geometry::Polygon(p) => GeoJsonGeometry::Polygon {
            coordinates: rings(p),
        },
        Geometry::MultiPolygon(mp) => GeoJsonGeometry::MultiPolygon {
            coordinates: mp.0.iter().map(rings).collect(),
        },
        _ => return None,
    })
}

/// Convert a geometry into a GeoJSON `Feature` value with empty properties.
pub fn geometry_to_geojson(g: &Geometry<f64>) -> Option<Value> {
    let wire = to_wire(g)?;
    let geometry = serde_json::to_value(wire).ok()?;
    Some(serde_json::json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {},
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAKES: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {"title": "USGS All Earthquakes, Past Week"},
        "features": [
            {
                "type": "Feature",
                "properties": {"mag": 2.5, "place": "10km NW of X", "time": 1700000000000},
                "geometry": {"type": "Point", "coordinates": [-117.5, 35.7, 8.2]},
                "id": "ci40000001"
            },
            {
                "type": "Feature",
                "properties": {"mag": null, "place": null, "time": 1700000001000},
                "geometry": {"type": "Point", "coordinates": [-150.1, 61.2]},
                "id": "ak0001"
            },
            {
                "type": "Feature",
                "properties": {"mag": 1.0},
                "geometry": null
            }
        ]
    }"#;

    const PLATES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"LAYER": "plate", "Code": "AF", "PlateName": "Africa"},
                "geometry": {"type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,0]]]}
            },
            {
                "type": "Feature",
                "properties": {"Name": "ridge"},
                "geometry": {"type": "LineString", "coordinates": [[1,2],[3,4]]}
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "Point", "coordinates": [1,2]}
            }
        ]
    }"#;

    #[test]
    fn test_parse_earthquakes() {
        let quakes = parse_earthquakes(QUAKES).unwrap();
        assert_eq!(quakes.len(), 2);

        let first = &quakes[0];
        assert_eq!(first.magnitude, Some(2.5));
        assert_eq!(first.place.as_deref(), Some("10km NW of X"));
        assert_eq!(first.time_ms, Some(1_700_000_000_000));
        assert_eq!(first.depth_km, Some(8.2));
        assert_eq!(first.lon(), -117.5);
        assert_eq!(first.lat(), 35.7);
        assert_eq!(first.id.as_deref(), Some("ci40000001"));

        let second = &quakes[1];
        assert_eq!(second.magnitude, None);
        assert_eq!(second.place, None);
        assert_eq!(second.depth_km, None);
    }

    #[test]
    fn test_parse_plate_boundaries() {
        let plates = parse_plate_boundaries(PLATES).unwrap();
        assert_eq!(plates.len(), 2);
        assert_eq!(plates[0].name.as_deref(), Some("Africa"));
        assert!(matches!(plates[0].geometry, Geometry::Polygon(_)));
        assert_eq!(plates[1].name.as_deref(), Some("ridge"));
        assert_eq!(plates[1].coord_count(), 2);
    }

    #[test]
    fn test_not_a_feature_collection() {
        let err = parse_earthquakes(r#"{"type": "Feature", "geometry": null}"#).unwrap_err();
        assert!(matches!(err, Error::NotAFeatureCollection { .. }));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_plate_boundaries("<html>"), Err(Error::Json(_))));
    }

    #[test]
    fn test_empty_collection() {
        let quakes = parse_earthquakes(r#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        assert!(quakes.is_empty());
    }

    #[test]
    fn test_short_position_skipped() {
        let body = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"mag": 3.0},
             "geometry": {"type": "Point", "coordinates": [1.0]}}
        ]}"#;
        assert!(parse_earthquakes(body).unwrap().is_empty());
    }

    #[test]
    fn test_geometry_to_geojson_polygon() {
        let plates = parse_plate_boundaries(PLATES).unwrap();
        let value = geometry_to_geojson(&plates[0].geometry).unwrap();
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "Polygon");
        assert_eq!(value["geometry"]["coordinates"][0][1][0], 10.0);
    }
}
