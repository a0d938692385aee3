//! Drives a `CohortMap` against a live GIS service with a headless surface
//! and prints what would be drawn.
//!
//! `RUST_LOG=cohort_map=debug,transport=debug cohort-map-probe --cohort 12 --source SYNPUF clusters`

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cohort_map::{
    CohortMap, EventLog, GisConfig, HeadlessSurface, MapEvent, MapOptions, RefreshOutcome,
    RenderSurface, UpdateOutcome,
};
use layers::MapLayer;
use layers::objects::MarkerKind;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use transport::{Credentials, HttpFetch};

#[derive(Parser, Debug)]
#[command(about = "Render cohort geodata into a headless map and summarize it")]
struct Args {
    #[arg(long)]
    cohort: i64,

    #[arg(long)]
    source: String,

    #[arg(value_enum, default_value_t = Mode::Density)]
    mode: Mode,

    /// Overrides GIS_SERVICE_URL / API_URL.
    #[arg(long)]
    service_url: Option<String>,

    #[arg(long, env = "GIS_BEARER_TOKEN", hide_env_values = true)]
    token: String,

    #[arg(long, default_value = "/#/cohortdefinition")]
    location: String,

    /// Number of cluster expansions to follow, largest cluster first.
    #[arg(long, default_value_t = 0)]
    expand: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Bounds,
    Density,
    Clusters,
}

#[derive(Debug, Serialize)]
struct Summary {
    bounds: Option<[[f64; 2]; 2]>,
    zoom: Option<f64>,
    no_geodata: bool,
    layers: Vec<LayerSummary>,
    notices: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct LayerSummary {
    kind: &'static str,
    items: usize,
    clusters: usize,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.service_url {
        Some(url) => GisConfig::from_lookup(|key| {
            (key == "GIS_SERVICE_URL").then(|| url.clone())
        }),
        None => GisConfig::from_env(),
    }
    .context("resolving GIS service url")?;
    if let Ok(tiles) = std::env::var("TILES_SERVER_URL") {
        config.tiles_server_url = tiles;
    }

    let fetch = HttpFetch::new(Credentials::new(args.token.clone(), args.location.clone()));
    let log = Arc::new(EventLog::new());
    let map = CohortMap::configure(
        MapOptions::new(&config, "probe"),
        Arc::new(fetch),
        log.clone(),
        |container: &str| HeadlessSurface::new(container),
    );
    map.set_params(args.cohort, args.source.clone());

    let outcome = map.refresh().await.context("refreshing cohort map")?;
    info!(?outcome, "refresh finished");

    if matches!(outcome, RefreshOutcome::Fitted { .. }) {
        match args.mode {
            Mode::Bounds => {}
            Mode::Density => {
                map.update_density_map().await.context("loading density")?;
            }
            Mode::Clusters => {
                let mut last = map.update_cluster_map().await.context("loading clusters")?;
                for _ in 0..args.expand {
                    let Some(center) = largest_cluster(&map) else {
                        break;
                    };
                    last = map.expand_cluster(center).await.context("expanding cluster")?;
                    if last == UpdateOutcome::Empty {
                        break;
                    }
                }
                info!(?last, "clusters finished");
            }
        }
    }

    let summary = summarize(&map, &log);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn largest_cluster(map: &CohortMap<HeadlessSurface>) -> Option<foundation::LatLng> {
    map.with_surface(|surface| {
        surface
            .layers()
            .filter_map(|(_, layer)| match layer {
                MapLayer::Clusters(objects) => Some(objects),
                _ => None,
            })
            .flat_map(|objects| objects.markers.iter())
            .filter_map(|marker| match marker.kind {
                MarkerKind::Cluster { size, .. } => Some((size, marker.position)),
                MarkerKind::Subject { .. } => None,
            })
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, position)| position)
    })
    .flatten()
}

fn summarize(map: &CohortMap<HeadlessSurface>, log: &EventLog) -> Summary {
    let layers: Vec<LayerSummary> = map
        .with_surface(|surface| {
            surface
                .layers()
                .map(|(_, layer)| LayerSummary {
                    kind: match layer {
                        MapLayer::Tiles(_) => "tiles",
                        MapLayer::Density(_) => "density",
                        MapLayer::Clusters(_) => "clusters",
                    },
                    items: layer.item_count(),
                    clusters: match layer {
                        MapLayer::Clusters(objects) => objects.clusters_iter().count(),
                        _ => 0,
                    },
                })
                .collect()
        })
        .unwrap_or_default();

    let notices: Vec<&'static str> = log
        .events()
        .into_iter()
        .filter_map(|event| match event {
            MapEvent::Notice(notice) => Some(notice.message()),
            _ => None,
        })
        .collect();

    Summary {
        bounds: map.with_surface(|s| s.bounds().corner_pairs()),
        zoom: map.with_surface(|s| s.zoom()),
        no_geodata: map.has_no_geodata(),
        layers,
        notices,
    }
}
