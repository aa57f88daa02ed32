//! Nearby-listings search for Souk.
//!
//! Given a center and a radius, [`ProximitySearch`] asks an [`EntityStore`] for
//! published listings inside the enclosing bounding box, keeps those whose
//! Haversine distance is within the radius and returns them nearest first
//! (newest first among equally distant listings).
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use souk_geo::GeoPoint;
//! use souk_proximity::{InMemoryStore, NearbyQuery, ProximitySearch, SearchableEntity};
//!
//! # tokio_test::block_on(async {
//! let store = InMemoryStore::with_entities([SearchableEntity::new(
//!     "ad-1",
//!     Some(GeoPoint::new(33.5731, -7.5898)),
//!     Utc::now(),
//! )
//! .with_field("title", "Canapé trois places")]);
//!
//! let search = ProximitySearch::new(store);
//! let results = search
//!     .search_query(&NearbyQuery::new(33.57, -7.59).with_radius(5.0))
//!     .await?;
//!
//! assert_eq!(results[0].title(), Some("Canapé trois places"));
//! # Ok::<(), souk_proximity::SearchError>(())
//! # }).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod entity;
mod error;
mod search;
mod store;

pub use entity::{EntityId, ListingStatus, ProximityResult, SearchableEntity};
pub use error::{Result, SearchError};
pub use search::{
    effective_radius, rank_candidates, NearbyQuery, ProximitySearch, DEFAULT_CANDIDATE_LIMIT,
    DEFAULT_RADIUS_KM, DISTANCE_TIE_EPSILON_KM, MIN_RADIUS_KM,
};
pub use store::{EntityStore, InMemoryStore, StoreError};
