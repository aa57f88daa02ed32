//! Latitude/longitude bounding boxes.
//!
//! A box is a cheap pre-filter: any store that can range-query two numeric
//! columns can narrow candidates before exact Haversine distances are computed.
//! The box is loose at its corners but must never be tighter than the circle.

use crate::haversine::EARTH_RADIUS_KM;
use crate::GeoPoint;
use serde::{Deserialize, Serialize};

/// Length of one degree of latitude on the sphere used for Haversine distances.
///
/// Deriving it from [`EARTH_RADIUS_KM`] keeps the box consistent with the exact
/// distance check; a larger figure (e.g. the WGS84 equatorial 111.32 km) makes
/// the box slightly narrower than the circle it approximates.
pub const KM_PER_DEGREE_LAT: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

/// Below this `cos(latitude)` the box spans every longitude.
pub const MIN_COS_LAT: f64 = 0.01;

/// A rectangle in latitude/longitude degrees, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southern edge
    pub min_lat: f64,
    /// Northern edge
    pub max_lat: f64,
    /// Western edge
    pub min_lon: f64,
    /// Eastern edge
    pub max_lon: f64,
}

impl BoundingBox {
    /// Computes the box enclosing a circle of `radius_km` around `center`.
    ///
    /// Latitudes are not clamped at the poles and longitudes are not wrapped at
    /// the antimeridian; a circle that reaches a pole gets a 360° wide box.
    ///
    /// # Example
    /// ```
    /// use souk_geo::{BoundingBox, GeoPoint};
    ///
    /// let center = GeoPoint::new(33.5731, -7.5898);
    /// let bbox = BoundingBox::around(&center, 10.0);
    /// assert!(bbox.contains(&center));
    /// assert!(bbox.max_lat - bbox.min_lat < 0.2);
    /// ```
    pub fn around(center: &GeoPoint, radius_km: f64) -> Self {
        let d_lat = radius_km / KM_PER_DEGREE_LAT;
        let d_lon = lon_half_span(center.latitude, radius_km);

        Self {
            min_lat: center.latitude - d_lat,
            max_lat: center.latitude + d_lat,
            min_lon: center.longitude - d_lon,
            max_lon: center.longitude + d_lon,
        }
    }

    /// Returns true if the point lies inside the box or on its edge.
    #[inline]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lon
            && point.longitude <= self.max_lon
    }

    /// Center of the box.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Latitude span in degrees.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude span in degrees.
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

/// Half-width in longitude degrees of the box around a circle of `radius_km`.
///
/// The flat estimate `r / (km_per_degree * cos lat)` misses the circle's widest
/// longitude, which lies slightly poleward of due east/west at
/// `asin(sin δ / cos φ)` for angular radius `δ`. The larger of the two is used.
/// A circle that reaches a pole, or a center where `cos φ` is below
/// [`MIN_COS_LAT`], spans every longitude.
fn lon_half_span(latitude: f64, radius_km: f64) -> f64 {
    let cos_lat = latitude.to_radians().cos();
    if cos_lat < MIN_COS_LAT {
        return 180.0;
    }

    let angular = radius_km / EARTH_RADIUS_KM;
    let ratio = angular.sin() / cos_lat;
    if angular >= std::f64::consts::FRAC_PI_2 || ratio >= 1.0 {
        return 180.0;
    }

    let flat = radius_km / (KM_PER_DEGREE_LAT * cos_lat);
    flat.max(ratio.asin().to_degrees()).min(180.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{destination_point, haversine_distance};

    const CASABLANCA: GeoPoint = GeoPoint::new(33.5731, -7.5898);

    #[test]
    fn test_box_is_centered() {
        let bbox = BoundingBox::around(&CASABLANCA, 10.0);
        let center = bbox.center();
        assert!((center.latitude - CASABLANCA.latitude).abs() < 1e-12);
        assert!((center.longitude - CASABLANCA.longitude).abs() < 1e-12);
    }

    #[test]
    fn test_box_size() {
        let bbox = BoundingBox::around(&CASABLANCA, 10.0);
        // 20 km / ~111.2 km per degree
        assert!((bbox.lat_span() - 0.18).abs() < 0.002, "lat span {}", bbox.lat_span());
        // Meridians converge, so the box is wider in degrees than it is tall
        assert!(bbox.lon_span() > bbox.lat_span());
    }

    #[test]
    fn test_box_at_equator_is_square_in_degrees() {
        let bbox = BoundingBox::around(&GeoPoint::new(0.0, 0.0), 5.0);
        assert!((bbox.lat_span() - bbox.lon_span()).abs() < 1e-12);
    }

    #[test]
    fn test_box_near_pole_spans_all_longitudes() {
        let bbox = BoundingBox::around(&GeoPoint::new(90.0, 0.0), 5.0);
        assert!(bbox.min_lon.is_finite());
        assert!(bbox.max_lon.is_finite());
        assert_eq!(bbox.lon_span(), 360.0);

        // 89.9° N with a 50 km radius reaches over the pole
        let bbox = BoundingBox::around(&GeoPoint::new(89.9, 10.0), 50.0);
        assert_eq!(bbox.lon_span(), 360.0);
    }

    #[test]
    fn test_lon_half_span_covers_widest_point() {
        let radius = 100.0;
        let latitude: f64 = 60.0;
        let angular = radius / EARTH_RADIUS_KM;
        let widest = (angular.sin() / latitude.to_radians().cos()).asin().to_degrees();
        let flat = radius / (KM_PER_DEGREE_LAT * latitude.to_radians().cos());

        assert!(widest > flat);
        assert_eq!(lon_half_span(latitude, radius), widest);
        assert_eq!(lon_half_span(-latitude, radius), widest);
    }

    #[test]
    fn test_contains_edges() {
        let bbox = BoundingBox::around(&CASABLANCA, 10.0);
        assert!(bbox.contains(&GeoPoint::new(bbox.max_lat, bbox.min_lon)));
        assert!(!bbox.contains(&GeoPoint::new(bbox.max_lat + 1e-6, CASABLANCA.longitude)));
        assert!(!bbox.contains(&GeoPoint::new(34.0209, -6.8416)));
    }

    #[test]
    fn test_box_never_tighter_than_circle() {
        let epsilon = 1e-6;
        for center in [CASABLANCA, GeoPoint::new(0.0, 0.0), GeoPoint::new(-60.0, 120.0)] {
            for radius in [0.5, 1.0, 10.0, 50.0] {
                let bbox = BoundingBox::around(&center, radius);
                for bearing in [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0] {
                    let point = destination_point(&center, bearing, radius - epsilon);
                    assert!(haversine_distance(&center, &point) <= radius);
                    assert!(
                        bbox.contains(&point),
                        "bearing {bearing} radius {radius} center {center} escaped the box"
                    );
                }
            }
        }
    }

    #[test]
    fn test_box_contains_circle_at_every_bearing() {
        let epsilon = 1e-6;
        for center in [
            GeoPoint::new(60.0, 24.9),
            GeoPoint::new(-60.0, 120.0),
            GeoPoint::new(75.0, -40.0),
            CASABLANCA,
        ] {
            for radius in [1.0, 50.0, 100.0, 500.0] {
                let bbox = BoundingBox::around(&center, radius);
                for step in 0..3600 {
                    let bearing = f64::from(step) / 10.0;
                    let point = destination_point(&center, bearing, radius - epsilon);
                    assert!(
                        bbox.contains(&point),
                        "bearing {bearing} radius {radius} center {center} escaped the box"
                    );
                }
            }
        }
    }
}
