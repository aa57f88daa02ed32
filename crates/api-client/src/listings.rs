//! Listings table as an [`EntityStore`]
//!
//! Candidates are fetched with a PostgREST range filter on the `latitude` and
//! `longitude` columns, so the table needs no geospatial index:
//!
//! ```text
//! GET /rest/v1/ads?select=...&status=eq.published
//!     &latitude=gte.<min>&latitude=lte.<max>
//!     &longitude=gte.<min>&longitude=lte.<max>&limit=<n>
//! ```

use crate::client::SoukClient;
use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use souk_geo::{BoundingBox, GeoPoint};
use souk_proximity::{EntityId, EntityStore, ListingStatus, SearchableEntity, StoreError};
use tracing::warn;

/// Columns fetched for each candidate
pub const LISTING_COLUMNS: &str =
    "id,latitude,longitude,status,created_at,title,price,currency,city,neighborhood,images";

/// Supabase-backed listing store
#[derive(Clone)]
pub struct SupabaseListingStore {
    client: SoukClient,
}

impl SupabaseListingStore {
    /// Create a store over the client's listings table
    pub(crate) fn new(client: SoukClient) -> Self {
        Self { client }
    }

    async fn fetch(
        &self,
        bbox: &BoundingBox,
        status: ListingStatus,
        limit: usize,
    ) -> ApiResult<Vec<SearchableEntity>> {
        let query = bounding_box_query(bbox, status, limit);
        let rows: Vec<ListingRow> = self
            .client
            .select(&self.client.config().listings_table, &query)
            .await?;

        let mut entities = rows
            .into_iter()
            .map(ListingRow::into_entity)
            .collect::<ApiResult<Vec<_>>>()?;

        if entities.len() > limit {
            warn!(returned = entities.len(), limit, "Listings query ignored its limit");
            entities.truncate(limit);
        }

        Ok(entities)
    }
}

impl EntityStore for SupabaseListingStore {
    async fn query_in_bounding_box(
        &self,
        bbox: &BoundingBox,
        status: ListingStatus,
        limit: usize,
    ) -> Result<Vec<SearchableEntity>, StoreError> {
        self.fetch(bbox, status, limit).await.map_err(StoreError::from)
    }
}

/// PostgREST query parameters for a bounding-box candidate fetch
pub fn bounding_box_query(
    bbox: &BoundingBox,
    status: ListingStatus,
    limit: usize,
) -> Vec<(String, String)> {
    vec![
        ("select".to_string(), LISTING_COLUMNS.to_string()),
        ("status".to_string(), format!("eq.{status}")),
        ("latitude".to_string(), format!("gte.{}", bbox.min_lat)),
        ("latitude".to_string(), format!("lte.{}", bbox.max_lat)),
        ("longitude".to_string(), format!("gte.{}", bbox.min_lon)),
        ("longitude".to_string(), format!("lte.{}", bbox.max_lon)),
        ("limit".to_string(), limit.to_string()),
    ]
}

/// One row of the listings table
#[derive(Debug, Clone, Deserialize)]
pub struct ListingRow {
    /// Primary key (uuid or integer)
    pub id: serde_json::Value,
    /// Latitude column
    pub latitude: Option<f64>,
    /// Longitude column
    pub longitude: Option<f64>,
    /// Lifecycle status
    pub status: String,
    /// Insertion time
    pub created_at: DateTime<Utc>,
    /// Every other selected column
    #[serde(flatten)]
    pub display_fields: serde_json::Map<String, serde_json::Value>,
}

impl ListingRow {
    /// Convert the row into a search entity
    ///
    /// A row missing either coordinate gets no location; an unknown status is
    /// an error because it means the schema moved under us.
    pub fn into_entity(self) -> ApiResult<SearchableEntity> {
        let id = match self.id {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => return Err(ApiError::InvalidRow(format!("unsupported id: {other}"))),
        };

        let status = self
            .status
            .parse::<ListingStatus>()
            .map_err(|e| ApiError::InvalidRow(format!("listing {id}: {e}")))?;

        let location = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        };

        Ok(SearchableEntity {
            id: EntityId::new(id),
            location,
            status,
            created_at: self.created_at,
            display_fields: self.display_fields,
        })
    }
}
