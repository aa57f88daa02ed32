//! Geospatial primitives for Souk listings.
//!
//! This crate provides:
//! - Validated geographic points
//! - Haversine great-circle distance
//! - Latitude/longitude bounding boxes for coarse radius pre-filtering
//! - Human-readable distance labels
//!
//! # Example
//!
//! ```
//! use souk_geo::{haversine_distance, GeoPoint};
//!
//! let casablanca = GeoPoint::new(33.5731, -7.5898);
//! let rabat = GeoPoint::new(34.0209, -6.8416);
//!
//! let distance_km = haversine_distance(&casablanca, &rabat);
//! assert!((distance_km - 87.0).abs() < 2.0);
//! ```

mod bbox;
mod error;
mod format;
mod haversine;

pub use bbox::{BoundingBox, KM_PER_DEGREE_LAT, MIN_COS_LAT};
pub use error::{GeoError, GeoErrorCode, Result};
pub use format::format_distance;
pub use haversine::{
    destination_point, haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M,
};

/// A geographic point with latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a new point without validating it.
    ///
    /// Use [`GeoPoint::try_new`] for input coming from users or the network.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a new point, rejecting non-finite or out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let point = Self::new(latitude, longitude);
        point.validate()?;
        Ok(point)
    }

    /// Returns true if both coordinates are finite and within range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Checks the point and reports which coordinate is wrong.
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "latitude {} is outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "longitude {} is outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let point = GeoPoint::new(33.5731, -7.5898);
        assert_eq!(point.latitude, 33.5731);
        assert_eq!(point.longitude, -7.5898);
    }

    #[test]
    fn test_point_validation() {
        assert!(GeoPoint::new(0.0, 0.0).is_valid());
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(GeoPoint::new(-90.0, -180.0).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_try_new_reports_bad_axis() {
        let err = GeoPoint::try_new(12.0, -200.0).unwrap_err();
        assert!(err.to_string().contains("longitude"));

        let err = GeoPoint::try_new(f64::NAN, 0.0).unwrap_err();
        assert!(err.to_string().contains("latitude"));
        assert_eq!(err.code(), GeoErrorCode::InvalidCoordinate);
    }

    #[test]
    fn test_point_from_tuple() {
        let point: GeoPoint = (34.0209, -6.8416).into();
        assert_eq!(point.latitude, 34.0209);
    }

    #[test]
    fn test_display() {
        assert_eq!(GeoPoint::new(34.0209, -6.8416).to_string(), "(34.02090, -6.84160)");
    }
}
