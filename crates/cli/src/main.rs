//! quakemap CLI - recent earthquakes and plate boundaries on a web map

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use quakemap_colormap::{radius, MagnitudeBand};
use quakemap_feeds::{FeedClient, FeedClientOptions, FeedPeriod, FeedSource, PLATE_BOUNDARIES_URL};
use quakemap_map::{AccessToken, BaseMap, MapConfig, MapView};

mod pipeline;

use pipeline::{RenderJob, RenderReport};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "quakemap")]
#[command(author, version, about = "Recent earthquakes and tectonic plates on an interactive map", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch both feeds and write the map page
    Render {
        /// Output directory
        #[arg(short, long, default_value = "map")]
        out: PathBuf,
        /// USGS feed window: hour, day, week, month
        #[arg(short, long, default_value = "week")]
        period: String,
        /// Earthquake feed URL (overrides --period)
        #[arg(long)]
        quakes_url: Option<String>,
        /// Plate boundary feed URL
        #[arg(long, default_value = PLATE_BOUNDARIES_URL)]
        faults_url: String,
        /// Tile provider access token
        #[arg(long, env = "MAPBOX_ACCESS_TOKEN", default_value = "", hide_env_values = true)]
        access_token: String,
        /// Initial map centre as "lat,lon"
        #[arg(long, default_value = "37.09,-95.71", allow_hyphen_values = true)]
        center: String,
        /// Initial zoom level
        #[arg(short, long, default_value = "4")]
        zoom: u8,
        /// Base map shown on load: outdoor, grayscale, satellite
        #[arg(short, long, default_value = "outdoor")]
        base: String,
        /// Per-request timeout in seconds (default: none)
        #[arg(long)]
        timeout: Option<u64>,
        /// Retries per feed after a failed request
        #[arg(long, default_value = "0")]
        retries: u32,
    },
    /// Print the magnitude bands, their colors and circle radii
    Bands,
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn parse_center(s: &str) -> Result<(f64, f64)> {
    let (lat, lon) = s
        .split_once(',')
        .with_context(|| format!("Center must be \"lat,lon\", got {:?}", s))?;
    let lat: f64 = lat.trim().parse().context("Invalid latitude")?;
    let lon: f64 = lon.trim().parse().context("Invalid longitude")?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        bail!("Center out of range: {}, {}", lat, lon);
    }
    Ok((lat, lon))
}

fn parse_base(s: &str) -> Result<BaseMap> {
    let base = match s.to_lowercase().as_str() {
        "outdoor" | "outdoors" | "streets" => BaseMap::Outdoor,
        "grayscale" | "greyscale" | "light" => BaseMap::Grayscale,
        "satellite" | "sat" => BaseMap::Satellite,
        _ => bail!("Unknown base map: {} (expected outdoor, grayscale, satellite)", s),
    };
    Ok(base)
}

fn done(report: &RenderReport, elapsed: Duration) {
    println!("Map saved to: {}", report.index.display());
    match report.earthquakes {
        Some(n) => println!("  Earthquakes: {}", n),
        None => println!("  Earthquakes: unavailable"),
    }
    match (&report.fault_lines, &report.fault_script) {
        (Some(n), Some(path)) => println!("  Plate boundaries: {} ({})", n, path.display()),
        _ => println!("  Plate boundaries: unavailable"),
    }
    println!("  Processing time: {:.2?}", elapsed);
}

fn print_bands() {
    println!("{:<6} {:<20} {:>12}", "Band", "Color", "Radius (m)");
    for band in MagnitudeBand::ALL {
        let r = match band {
            MagnitudeBand::BelowOne => format!("< {:.0}", radius(1.0)),
            b => format!("{:.0}+", radius(b.lower())),
        };
        println!("{:<6} {:<20} {:>12}", band.label(), band.color().css(), r);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Render ───────────────────────────────────────────────────
        Commands::Render {
            out,
            period,
            quakes_url,
            faults_url,
            access_token,
            center,
            zoom,
            base,
            timeout,
            retries,
        } => {
            let source = match quakes_url {
                Some(url) => FeedSource::Custom(url),
                None => FeedSource::Usgs(period.parse::<FeedPeriod>()?),
            };
            let (lat, lon) = parse_center(&center)?;
            let access_token = AccessToken::new(access_token);
            if access_token.is_empty() {
                info!("No tile access token set; base map tiles will not load");
            }

            let job = RenderJob {
                quakes_url: source.url(),
                faults_url,
                out_dir: out,
                map: MapConfig {
                    view: MapView { lat, lon, zoom },
                    access_token,
                    default_base: parse_base(&base)?,
                    ..Default::default()
                },
            };

            let client = FeedClient::new(FeedClientOptions {
                request_timeout: timeout.map(Duration::from_secs),
                max_retries: retries,
                ..Default::default()
            })
            .context("Failed to create feed client")?;

            info!("Earthquakes: {}", job.quakes_url);
            info!("Plate boundaries: {}", job.faults_url);

            let pb = spinner("Fetching feeds...");
            let start = Instant::now();
            let result = pipeline::run(&client, &job).await;
            pb.finish_and_clear();
            let report = result?;
            done(&report, start.elapsed());
        }

        // ── Bands ────────────────────────────────────────────────────
        Commands::Bands => print_bands(),
    }

    Ok(())
}
