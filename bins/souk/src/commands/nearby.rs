//! Nearby-listings command

use anyhow::{Context, Result};
use souk_api_client::SoukClient;
use souk_cli::output::{format_count, format_duration, print_results, Status};
use souk_geo::{format_distance, GeoPoint};
use souk_proximity::{
    effective_radius, EntityStore, InMemoryStore, ProximityResult, ProximitySearch,
    SearchableEntity,
};
use souk_telemetry::{metrics, Event};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Resolved arguments, settings defaults already applied
#[derive(Debug, Clone)]
pub struct Args {
    pub lat: f64,
    pub lng: f64,
    pub radius_km: f64,
    pub limit: usize,
    pub fixture: Option<PathBuf>,
    pub json: bool,
    pub metrics: bool,
}

/// Run the search and print the results
pub async fn run(args: &Args) -> Result<()> {
    let center = GeoPoint::try_new(args.lat, args.lng)?;
    if !args.json {
        match &args.fixture {
            Some(path) => Status::info(&format!("Searching fixture {}", path.display())),
            None => Status::info("Searching hosted listings"),
        }
    }
    let start = Instant::now();

    let results = match &args.fixture {
        Some(path) => {
            let store = InMemoryStore::with_entities(load_fixture(path)?);
            search(store, center, args).await?
        }
        None => {
            let client = SoukClient::new().context("Hosted listings store is not configured")?;
            search(client.listings(), center, args).await?
        }
    };
    let elapsed = start.elapsed();

    Event::new(
        "nearby_search",
        serde_json::json!({
            "latitude": center.latitude,
            "longitude": center.longitude,
            "radius_km": args.radius_km,
            "limit": args.limit,
            "results": results.len(),
            "elapsed_ms": elapsed.as_millis() as u64,
        }),
    )
    .log();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        Status::header(&format!(
            "Listings within {} of {center}",
            format_distance(effective_radius(args.radius_km))
        ));
        print_results(&results);
        println!();
        Status::success(&format!(
            "{} in {}",
            format_count(results.len(), "listing", "listings"),
            format_duration(elapsed)
        ));
    }

    if args.metrics {
        eprintln!("{}", serde_json::to_string_pretty(&metrics().export_json())?);
    }

    Ok(())
}

async fn search<S: EntityStore>(
    store: S,
    center: GeoPoint,
    args: &Args,
) -> Result<Vec<ProximityResult>> {
    let results = ProximitySearch::new(store)
        .search(center, args.radius_km, args.limit)
        .await?;
    Ok(results)
}

/// Read a JSON array of listings
pub fn load_fixture(path: &Path) -> Result<Vec<SearchableEntity>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse fixture {}", path.display()))
}
