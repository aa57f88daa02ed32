//! Nearby-listings search.
//!
//! Two passes: a bounding-box range query narrows candidates in the store, then
//! exact Haversine distances drop the box corners and order what is left.

use crate::entity::{ListingStatus, ProximityResult, SearchableEntity};
use crate::error::Result;
use crate::store::EntityStore;
use serde::{Deserialize, Serialize};
use souk_geo::{haversine_distance, BoundingBox, GeoPoint};
use souk_telemetry::{metrics, Timer};
use tracing::{debug, field, instrument, warn};

/// Radius used when the caller passes a non-positive or non-finite one.
pub const MIN_RADIUS_KM: f64 = 1.0;

/// Radius used by [`NearbyQuery`] when none is given.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Candidate rows fetched by [`NearbyQuery`] when no limit is given.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 24;

/// Neighbouring distances (in distance order) at most this far apart are
/// treated as equal and ordered newest first.
pub const DISTANCE_TIE_EPSILON_KM: f64 = 1e-9;

/// Replaces an unusable radius with [`MIN_RADIUS_KM`].
///
/// ```
/// use souk_proximity::{effective_radius, MIN_RADIUS_KM};
///
/// assert_eq!(effective_radius(5.0), 5.0);
/// assert_eq!(effective_radius(0.0), MIN_RADIUS_KM);
/// assert_eq!(effective_radius(-5.0), MIN_RADIUS_KM);
/// assert_eq!(effective_radius(f64::NAN), MIN_RADIUS_KM);
/// ```
pub fn effective_radius(radius_km: f64) -> f64 {
    if radius_km.is_finite() && radius_km > 0.0 {
        radius_km
    } else {
        MIN_RADIUS_KM
    }
}

/// Query parameters as they arrive from the listings page
/// (`?lat=..&lng=..&radius=..&limit=..`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearbyQuery {
    /// Center latitude
    pub lat: f64,
    /// Center longitude
    pub lng: f64,
    /// Radius in kilometers
    #[serde(default)]
    pub radius: Option<f64>,
    /// Candidate rows to fetch
    #[serde(default)]
    pub limit: Option<usize>,
}

impl NearbyQuery {
    /// Creates a query with default radius and limit.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            radius: None,
            limit: None,
        }
    }

    /// Sets the radius.
    #[must_use]
    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius = Some(radius_km);
        self
    }

    /// Sets the candidate limit.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The search center (unvalidated).
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Finds published listings around a point, nearest first.
///
/// The store is injected, so any backend that can range-query latitude and
/// longitude columns works, including [`crate::InMemoryStore`] in tests.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use souk_geo::GeoPoint;
/// use souk_proximity::{InMemoryStore, ProximitySearch, SearchableEntity};
///
/// # tokio_test::block_on(async {
/// let store = InMemoryStore::with_entities([
///     SearchableEntity::new("maarif", Some(GeoPoint::new(33.5822, -7.6336)), Utc::now()),
///     SearchableEntity::new("rabat", Some(GeoPoint::new(34.0209, -6.8416)), Utc::now()),
/// ]);
/// let search = ProximitySearch::new(store);
///
/// let results = search.search(GeoPoint::new(33.5731, -7.5898), 10.0, 24).await.unwrap();
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].id.as_str(), "maarif");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct ProximitySearch<S> {
    store: S,
}

impl<S: EntityStore> ProximitySearch<S> {
    /// Creates a search over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns published listings within `radius_km` of `center`, nearest first.
    ///
    /// - `center` must be finite and in range, otherwise
    ///   [`crate::SearchError::InvalidArgument`].
    /// - A non-positive or non-finite `radius_km` becomes [`MIN_RADIUS_KM`].
    /// - `limit` caps the candidate rows fetched from the store, not the
    ///   result: candidates outside the circle are dropped afterwards, so the
    ///   result may be shorter than `limit` even when more listings qualify.
    #[instrument(skip(self), fields(candidates = field::Empty, results = field::Empty))]
    pub async fn search(
        &self,
        center: GeoPoint,
        radius_km: f64,
        limit: usize,
    ) -> Result<Vec<ProximityResult>> {
        center.validate()?;

        let radius = effective_radius(radius_km);
        if radius != radius_km {
            debug!(requested = radius_km, radius, "Radius replaced by minimum");
        }

        if limit == 0 {
            return Ok(Vec::new());
        }

        let timer = Timer::start("proximity.search_ms");
        metrics().increment("proximity.searches");

        let bbox = BoundingBox::around(&center, radius);
        let candidates = match self
            .store
            .query_in_bounding_box(&bbox, ListingStatus::Published, limit)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                metrics().increment("proximity.store_errors");
                warn!(error = %e, "Entity store query failed");
                return Err(e.into());
            }
        };

        let fetched = candidates.len();
        metrics().increment_by("proximity.candidates", fetched as u64);
        if fetched > limit {
            warn!(fetched, limit, "Store returned more rows than requested");
        }

        let results = rank_candidates(&center, radius, candidates);
        metrics().increment_by("proximity.results", results.len() as u64);

        tracing::Span::current()
            .record("candidates", fetched)
            .record("results", results.len());
        debug!(
            fetched,
            kept = results.len(),
            elapsed_ms = timer.stop().as_millis(),
            "Proximity search finished"
        );

        Ok(results)
    }

    /// Runs [`ProximitySearch::search`] with the defaults for missing parameters.
    pub async fn search_query(&self, query: &NearbyQuery) -> Result<Vec<ProximityResult>> {
        self.search(
            query.center(),
            query.radius.unwrap_or(DEFAULT_RADIUS_KM),
            query.limit.unwrap_or(DEFAULT_CANDIDATE_LIMIT),
        )
        .await
    }
}

/// Computes distances, drops candidates outside `radius_km` (or without
/// coordinates, or not searchable) and sorts nearest first, newest first on
/// ties.
pub fn rank_candidates(
    center: &GeoPoint,
    radius_km: f64,
    candidates: Vec<SearchableEntity>,
) -> Vec<ProximityResult> {
    let mut results: Vec<ProximityResult> = candidates
        .into_iter()
        .filter(|entity| entity.status.is_searchable())
        .filter_map(|entity| {
            let distance = haversine_distance(center, &entity.location?);
            (distance <= radius_km).then(|| ProximityResult::new(entity, distance))
        })
        .collect();

    order_nearest_first(&mut results);
    results
}

/// Sorts by distance, then reorders each run of tied distances newest first.
///
/// A run grows while the next distance is within [`DISTANCE_TIE_EPSILON_KM`]
/// of the previous one, so equality does not depend on where a rounding
/// boundary falls.
fn order_nearest_first(results: &mut [ProximityResult]) {
    results.sort_by(|a, b| a.distance_km().total_cmp(&b.distance_km()));

    let mut start = 0;
    while start < results.len() {
        let mut end = start + 1;
        while end < results.len()
            && results[end].distance_km() - results[end - 1].distance_km()
                <= DISTANCE_TIE_EPSILON_KM
        {
            end += 1;
        }

        if end - start > 1 {
            results[start..end].sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| a.distance_km().total_cmp(&b.distance_km()))
            });
        }
        start = end;
    }
}
