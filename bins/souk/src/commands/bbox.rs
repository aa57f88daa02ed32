//! Bounding-box command

use anyhow::Result;
use souk_cli::output::{print_bounding_box, Status};
use souk_geo::{format_distance, BoundingBox, GeoPoint};
use souk_proximity::effective_radius;

/// Print the box a search at this center and radius would query
pub fn run(lat: f64, lng: f64, radius_km: f64) -> Result<()> {
    let center = GeoPoint::try_new(lat, lng)?;
    let radius = effective_radius(radius_km);
    let bbox = BoundingBox::around(&center, radius);

    Status::header(&format!("Bounding box around {center}, r = {}", format_distance(radius)));
    print_bounding_box(&bbox);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_center() {
        assert!(run(0.0, 181.0, 5.0).is_err());
    }

    #[test]
    fn test_floors_radius() {
        assert!(run(33.5731, -7.5898, -5.0).is_ok());
    }
}
