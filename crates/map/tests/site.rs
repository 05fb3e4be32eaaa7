//! End-to-end tests for page output.

use std::fs;

use geo_types::{line_string, Geometry};
use quakemap_core::{Earthquake, PlateBoundary};
use quakemap_map::{EarthquakeLayer, FaultLineGroup, MapConfig, QuakeMap, SiteWriter};

fn boundaries(n: usize) -> Vec<PlateBoundary> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            PlateBoundary::new(Geometry::LineString(line_string![
                (x: x, y: 0.0),
                (x: x + 1.0, y: 1.0),
            ]))
        })
        .collect()
}

#[test]
fn late_fault_lines_do_not_rewrite_the_index() {
    let dir = tempfile::tempdir().unwrap();
    let config = MapConfig::default();
    let site = SiteWriter::create(dir.path().join("out"), &config.fault_line_script).unwrap();

    let group = FaultLineGroup::new();
    let quakes = EarthquakeLayer::from_earthquakes(vec![
        Earthquake::new(-117.5, 35.7).with_magnitude(2.5).with_place("10km NW of X"),
        Earthquake::new(142.3, 38.1).with_magnitude(6.0),
    ]);
    let map = QuakeMap::compose(&config, Some(quakes), group.clone());

    // first paint with an empty group
    let index = site.write_index(&map).unwrap();
    let first = fs::read_to_string(&index).unwrap();
    assert!(first.contains("10km NW of X"));
    assert!(!site.fault_lines_path().exists());

    group.extend(boundaries(3));
    let script = site.write_fault_lines(&group).unwrap();

    assert_eq!(fs::read_to_string(&index).unwrap(), first);
    let body = fs::read_to_string(script).unwrap();
    assert!(body.starts_with("window.quakemapAddFaultLines("));
    assert_eq!(body.matches("\"LineString\"").count(), 3);
}

#[test]
fn new_index_drops_stale_fault_lines() {
    let dir = tempfile::tempdir().unwrap();
    let site = SiteWriter::create(dir.path(), "faultlines.js").unwrap();

    let group = FaultLineGroup::new();
    group.extend(boundaries(1));
    site.write_fault_lines(&group).unwrap();
    assert!(site.fault_lines_path().exists());

    let map = QuakeMap::compose(&MapConfig::default(), None, FaultLineGroup::new());
    site.write_index(&map).unwrap();
    assert!(site.index_path().exists());
    assert!(!site.fault_lines_path().exists());
}
