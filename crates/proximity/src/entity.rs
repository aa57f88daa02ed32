//! Listing records as seen by proximity search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use souk_geo::GeoPoint;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Opaque listing identifier (a UUID in the hosted tables, but never parsed).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wraps an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Moderation/lifecycle state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Being edited by its owner
    Draft,
    /// Live and visible to buyers
    Published,
    /// Marked sold by its owner
    Sold,
    /// Withdrawn or expired
    Archived,
    /// Refused by moderation
    Rejected,
}

impl ListingStatus {
    /// Lowercase name used in storage and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Sold => "sold",
            Self::Archived => "archived",
            Self::Rejected => "rejected",
        }
    }

    /// Only published listings show up in search.
    pub fn is_searchable(&self) -> bool {
        matches!(self, Self::Published)
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            // "active" is the older name for the same state
            "published" | "active" => Ok(Self::Published),
            "sold" => Ok(Self::Sold),
            "archived" => Ok(Self::Archived),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown listing status: {other}")),
        }
    }
}

/// A listing eligible for proximity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchableEntity {
    /// Listing identifier
    pub id: EntityId,
    /// Where the listing is; listings without coordinates are never returned
    pub location: Option<GeoPoint>,
    /// Lifecycle state
    pub status: ListingStatus,
    /// Creation time, used as the tie-break between equally distant listings
    pub created_at: DateTime<Utc>,
    /// Presentation data (title, price, currency, city, neighborhood, images)
    #[serde(default)]
    pub display_fields: serde_json::Map<String, serde_json::Value>,
}

impl SearchableEntity {
    /// Creates a published listing with no display fields.
    pub fn new(id: impl Into<EntityId>, location: Option<GeoPoint>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            location,
            status: ListingStatus::Published,
            created_at,
            display_fields: serde_json::Map::new(),
        }
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: ListingStatus) -> Self {
        self.status = status;
        self
    }

    /// Adds a display field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.display_fields.insert(key.into(), value.into());
        self
    }

    /// The listing title, if present.
    pub fn title(&self) -> Option<&str> {
        self.display_fields.get("title").and_then(|v| v.as_str())
    }
}

/// A listing annotated with its great-circle distance from the search center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProximityResult {
    #[serde(flatten)]
    entity: SearchableEntity,
    distance_km: f64,
}

impl ProximityResult {
    pub(crate) fn new(entity: SearchableEntity, distance_km: f64) -> Self {
        Self { entity, distance_km }
    }

    /// Distance from the search center in kilometers.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// The listing snapshot.
    pub fn entity(&self) -> &SearchableEntity {
        &self.entity
    }

    /// Consumes the result and returns the listing snapshot.
    pub fn into_entity(self) -> SearchableEntity {
        self.entity
    }
}

impl Deref for ProximityResult {
    type Target = SearchableEntity;

    fn deref(&self) -> &Self::Target {
        &self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_status_round_trip_names() {
        for status in [
            ListingStatus::Draft,
            ListingStatus::Published,
            ListingStatus::Sold,
            ListingStatus::Archived,
            ListingStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ListingStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_status_accepts_legacy_active() {
        assert_eq!("Active".parse::<ListingStatus>(), Ok(ListingStatus::Published));
        assert!("pending".parse::<ListingStatus>().is_err());
    }

    #[test]
    fn test_only_published_is_searchable() {
        assert!(ListingStatus::Published.is_searchable());
        assert!(!ListingStatus::Draft.is_searchable());
        assert!(!ListingStatus::Sold.is_searchable());
    }

    #[test]
    fn test_entity_deserialize() {
        let entity: SearchableEntity = serde_json::from_value(json!({
            "id": "ad-1",
            "location": {"latitude": 33.57, "longitude": -7.59},
            "status": "published",
            "created_at": "2026-03-01T10:00:00Z",
            "display_fields": {"title": "Vélo", "price": 900, "currency": "MAD"}
        }))
        .unwrap();

        assert_eq!(entity.id.as_str(), "ad-1");
        assert_eq!(entity.title(), Some("Vélo"));
        assert_eq!(entity.created_at, Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_entity_without_fields_or_location() {
        let entity: SearchableEntity = serde_json::from_value(json!({
            "id": "ad-2",
            "location": null,
            "status": "draft",
            "created_at": "2026-03-01T10:00:00Z"
        }))
        .unwrap();

        assert!(entity.location.is_none());
        assert!(entity.display_fields.is_empty());
        assert_eq!(entity.title(), None);
    }

    #[test]
    fn test_result_serializes_flat() {
        let entity = SearchableEntity::new("ad-3", Some(GeoPoint::new(1.0, 2.0)), Utc::now())
            .with_field("title", "Table");
        let result = ProximityResult::new(entity, 1.5);
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["id"], "ad-3");
        assert_eq!(value["distance_km"], 1.5);
        assert_eq!(value["display_fields"]["title"], "Table");
        assert_eq!(result.title(), Some("Table"));
    }
}
