//! Point-to-point distance command

use anyhow::Result;
use owo_colors::OwoColorize;
use souk_geo::{format_distance, haversine_distance, GeoPoint};

/// Print the great-circle distance between two points
pub fn run(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Result<()> {
    let from = GeoPoint::try_new(lat1, lng1)?;
    let to = GeoPoint::try_new(lat2, lng2)?;
    let km = haversine_distance(&from, &to);

    println!(
        "{} → {}: {} {}",
        from,
        to,
        format_distance(km).bold(),
        format!("({km:.3} km)").dimmed()
    );
    Ok(())
}
