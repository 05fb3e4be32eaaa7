//! Acquisition and composition pipeline.
//!
//! The boundary fetch is spawned first and fills a pending group whenever it
//! completes. The earthquake fetch, composition and first page write happen
//! meanwhile, so the page is produced whether the boundaries arrive before
//! or long after it. Either feed may fail; the page is written regardless.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use quakemap_feeds::FeedClient;
use quakemap_map::{EarthquakeLayer, FaultLineGroup, MapConfig, QuakeMap, SiteWriter};

/// Everything needed for one render.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub quakes_url: String,
    pub faults_url: String,
    pub out_dir: PathBuf,
    pub map: MapConfig,
}

/// What a render produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub index: PathBuf,
    /// Earthquakes plotted, `None` if the feed failed.
    pub earthquakes: Option<usize>,
    /// Plate boundaries written, `None` if the feed failed or was empty.
    pub fault_lines: Option<usize>,
    pub fault_script: Option<PathBuf>,
}

pub async fn run(client: &FeedClient, job: &RenderJob) -> Result<RenderReport> {
    let site = SiteWriter::create(&job.out_dir, &job.map.fault_line_script)
        .with_context(|| format!("Failed to prepare {}", job.out_dir.display()))?;

    let group = FaultLineGroup::new();
    let fault_task = {
        let client = client.clone();
        let url = job.faults_url.clone();
        let group = group.clone();
        tokio::spawn(async move {
            match client.fetch_plate_boundaries(&url).await {
                Ok(boundaries) => {
                    let added = group.extend(boundaries);
                    debug!("{} plate boundaries added to group", added);
                    true
                }
                Err(e) => {
                    warn!("fault lines unavailable: {}", e);
                    false
                }
            }
        })
    };

    let earthquakes = match client.fetch_earthquakes(&job.quakes_url).await {
        Ok(quakes) => Some(EarthquakeLayer::from_earthquakes(quakes)),
        Err(e) => {
            warn!("earthquakes unavailable: {}", e);
            None
        }
    };
    let earthquake_count = earthquakes.as_ref().map(EarthquakeLayer::len);

    let map = QuakeMap::compose(&job.map, earthquakes, group.clone());
    let index = site.write_index(&map).context("Failed to write map page")?;

    let fetched = fault_task.await.context("Fault-line task panicked")?;

    let (fault_lines, fault_script) = if fetched && !group.is_empty() {
        let path = site
            .write_fault_lines(&group)
            .context("Failed to write fault lines")?;
        (Some(group.len()), Some(path))
    } else {
        (None, None)
    };

    Ok(RenderReport {
        index,
        earthquakes: earthquake_count,
        fault_lines,
        fault_script,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    use quakemap_feeds::FeedClientOptions;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn quake_doc() -> serde_json::Value {
        serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"mag": 2.5, "place": "10km NW of X", "time": 1700000000000i64},
                "geometry": {"type": "Point", "coordinates": [-117.5, 35.7, 8.2]}
            }]
        })
    }

    fn plate_doc() -> serde_json::Value {
        serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"PlateName": "Africa"},
                 "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 0.0]]]}},
                {"type": "Feature", "properties": {"PlateName": "Pacific"},
                 "geometry": {"type": "Polygon", "coordinates": [[[170.0, 0.0], [180.0, 0.0], [180.0, 10.0], [170.0, 0.0]]]}}
            ]
        })
    }

    async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(response)
            .mount(server)
            .await;
    }

    fn job(server: &MockServer, dir: &std::path::Path) -> RenderJob {
        RenderJob {
            quakes_url: format!("{}/quakes", server.uri()),
            faults_url: format!("{}/plates", server.uri()),
            out_dir: dir.to_path_buf(),
            map: MapConfig::default(),
        }
    }

    fn client() -> FeedClient {
        FeedClient::new(FeedClientOptions::default()).unwrap()
    }

    #[tokio::test]
    async fn fault_lines_arriving_after_first_paint() {
        let server = MockServer::start().await;
        mount(&server, "/quakes", ResponseTemplate::new(200).set_body_json(quake_doc())).await;
        mount(
            &server,
            "/plates",
            ResponseTemplate::new(200)
                .set_body_json(plate_doc())
                .set_delay(Duration::from_millis(200)),
        )
        .await;

        let dir = tempfile::tempdir().unwrap();
        let report = run(&client(), &job(&server, dir.path())).await.unwrap();

        assert_eq!(report.earthquakes, Some(1));
        assert_eq!(report.fault_lines, Some(2));
        let index = fs::read_to_string(&report.index).unwrap();
        assert!(index.contains("10km NW of X"));
        assert!(!index.contains("Africa"));
        let script = fs::read_to_string(report.fault_script.unwrap()).unwrap();
        assert!(script.contains("Africa"));
    }

    #[tokio::test]
    async fn fault_lines_arriving_before_earthquakes() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/quakes",
            ResponseTemplate::new(200)
                .set_body_json(quake_doc())
                .set_delay(Duration::from_millis(200)),
        )
        .await;
        mount(&server, "/plates", ResponseTemplate::new(200).set_body_json(plate_doc())).await;

        let dir = tempfile::tempdir().unwrap();
        let report = run(&client(), &job(&server, dir.path())).await.unwrap();

        assert_eq!(report.earthquakes, Some(1));
        assert_eq!(report.fault_lines, Some(2));
        assert!(report.fault_script.unwrap().exists());
    }

    #[tokio::test]
    async fn earthquake_failure_still_writes_page() {
        let server = MockServer::start().await;
        mount(&server, "/quakes", ResponseTemplate::new(500)).await;
        mount(&server, "/plates", ResponseTemplate::new(200).set_body_json(plate_doc())).await;

        let dir = tempfile::tempdir().unwrap();
        let report = run(&client(), &job(&server, dir.path())).await.unwrap();

        assert_eq!(report.earthquakes, None);
        assert_eq!(report.fault_lines, Some(2));
        let index = fs::read_to_string(&report.index).unwrap();
        assert!(index.contains("\"earthquakes\":null"));
    }

    #[tokio::test]
    async fn fault_line_failure_leaves_group_empty() {
        let server = MockServer::start().await;
        mount(&server, "/quakes", ResponseTemplate::new(200).set_body_json(quake_doc())).await;
        mount(&server, "/plates", ResponseTemplate::new(200).set_body_string("not json")).await;

        let dir = tempfile::tempdir().unwrap();
        let report = run(&client(), &job(&server, dir.path())).await.unwrap();

        assert_eq!(report.earthquakes, Some(1));
        assert_eq!(report.fault_lines, None);
        assert_eq!(report.fault_script, None);
        assert!(report.index.exists());
        assert!(!dir.path().join("faultlines.js").exists());
    }
}
