//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use souk_geo::{format_distance, BoundingBox};
use souk_proximity::ProximityResult;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Width of the title column in result tables
const TITLE_WIDTH: usize = 36;

/// One plain-text line per result: rank, distance, title, id
///
/// Entities without a `title` display field show their id instead.
pub fn result_row(rank: usize, result: &ProximityResult) -> String {
    let title = result.title().unwrap_or(result.id.as_str());
    format!(
        "{:>3}. {:>8}  {:<width$}  {}",
        rank,
        format_distance(result.distance_km()),
        truncate(title, TITLE_WIDTH),
        result.id,
        width = TITLE_WIDTH
    )
}

/// Print search results as a ranked table
pub fn print_results(results: &[ProximityResult]) {
    if results.is_empty() {
        Status::warning("No listings in range");
        return;
    }

    for (i, result) in results.iter().enumerate() {
        let row = result_row(i + 1, result);
        if i == 0 {
            println!("{}", row.green());
        } else {
            println!("{row}");
        }
    }
}

/// Print a bounding box, one edge per line
pub fn print_bounding_box(bbox: &BoundingBox) {
    println!("  {:<8} {:>11.6}", "min_lat".dimmed(), bbox.min_lat);
    println!("  {:<8} {:>11.6}", "max_lat".dimmed(), bbox.max_lat);
    println!("  {:<8} {:>11.6}", "min_lon".dimmed(), bbox.min_lon);
    println!("  {:<8} {:>11.6}", "max_lon".dimmed(), bbox.max_lon);
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use souk_geo::GeoPoint;
    use souk_proximity::{InMemoryStore, ProximitySearch, SearchableEntity};
    use std::time::Duration;

    #[test]
    fn test_format_duration_ms() {
        let d = Duration::from_millis(500);
        assert_eq!(format_duration(d), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        let d = Duration::from_secs_f32(5.5);
        assert_eq!(format_duration(d), "5.5s");
    }

    #[test]
    fn test_format_duration_mins() {
        let d = Duration::from_secs(125);
        assert_eq!(format_duration(d), "2m 5s");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "listing", "listings"), "1 listing");
        assert_eq!(format_count(0, "listing", "listings"), "0 listings");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Réfrigérateur Samsung", 8), "Réfrigé…");
    }

    #[tokio::test]
    async fn test_result_row() {
        let created = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap();
        let center = GeoPoint::new(33.5731, -7.5898);
        let store = InMemoryStore::with_entities([
            SearchableEntity::new("fridge-1", Some(center), created).with_field("title", "Frigo"),
            SearchableEntity::new("no-title", Some(GeoPoint::new(33.58, -7.59)), created),
        ]);

        let results = ProximitySearch::new(store).search(center, 5.0, 24).await.unwrap();
        assert_eq!(results.len(), 2);

        let first = result_row(1, &results[0]);
        assert!(first.starts_with("  1."));
        assert!(first.contains("0 m"));
        assert!(first.contains("Frigo"));
        assert!(first.ends_with("fridge-1"));

        let second = result_row(2, &results[1]);
        assert!(second.contains("no-title"));
    }
}
