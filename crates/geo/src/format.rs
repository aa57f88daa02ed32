//! Distance labels for listing cards and map popups.

/// Formats a distance in kilometers for display.
///
/// - under 1 km: meters, rounded to the nearest 10 m (`"850 m"`)
/// - under 10 km: one decimal (`"4.3 km"`)
/// - otherwise: whole kilometers (`"27 km"`)
///
/// # Example
/// ```
/// use souk_geo::format_distance;
///
/// assert_eq!(format_distance(0.853), "850 m");
/// assert_eq!(format_distance(4.26), "4.3 km");
/// assert_eq!(format_distance(87.4), "87 km");
/// ```
pub fn format_distance(distance_km: f64) -> String {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return "-".to_string();
    }

    if distance_km < 1.0 {
        let meters = ((distance_km * 1000.0) / 10.0).round() * 10.0;
        if meters >= 1000.0 {
            return "1.0 km".to_string();
        }
        format!("{meters:.0} m")
    } else if distance_km < 10.0 {
        format!("{distance_km:.1} km")
    } else {
        format!("{distance_km:.0} km")
    }
}
