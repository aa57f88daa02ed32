//! The store capability proximity search reads from.

use crate::entity::{EntityId, ListingStatus, SearchableEntity};
use souk_geo::BoundingBox;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Failures reported by an [`EntityStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The query did not finish in time
    #[error("Store query timed out")]
    Timeout,

    /// The store answered with a non-success status
    #[error("Store returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Rows came back in a shape we could not read
    #[error("Malformed store response: {0}")]
    Decode(String),
}

/// A queryable collection of geotagged listings.
///
/// Implementations must:
/// - return only entities with coordinates whose status equals `status`,
/// - return only entities inside `bbox` (bounds inclusive),
/// - return at most `limit` rows, in any order.
pub trait EntityStore: Send + Sync {
    /// Fetches up to `limit` entities with `status` located inside `bbox`.
    fn query_in_bounding_box(
        &self,
        bbox: &BoundingBox,
        status: ListingStatus,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SearchableEntity>, StoreError>> + Send;
}

impl<S: EntityStore> EntityStore for Arc<S> {
    fn query_in_bounding_box(
        &self,
        bbox: &BoundingBox,
        status: ListingStatus,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SearchableEntity>, StoreError>> + Send {
        self.as_ref().query_in_bounding_box(bbox, status, limit)
    }
}

/// An [`EntityStore`] backed by a vector, for tests, fixtures and demos.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entities: RwLock<Vec<SearchableEntity>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `entities`.
    pub fn with_entities(entities: impl IntoIterator<Item = SearchableEntity>) -> Self {
        Self {
            entities: RwLock::new(entities.into_iter().collect()),
        }
    }

    /// Adds or replaces an entity (matched by id).
    pub fn upsert(&self, entity: SearchableEntity) {
        let mut entities = self.entities.write().unwrap_or_else(PoisonError::into_inner);
        match entities.iter_mut().find(|e| e.id == entity.id) {
            Some(existing) => *existing = entity,
            None => entities.push(entity),
        }
    }

    /// Removes an entity, returning it if it existed.
    pub fn remove(&self, id: &EntityId) -> Option<SearchableEntity> {
        let mut entities = self.entities.write().unwrap_or_else(PoisonError::into_inner);
        let index = entities.iter().position(|e| &e.id == id)?;
        Some(entities.remove(index))
    }

    /// Number of stored entities, whatever their status.
    pub fn len(&self) -> usize {
        self.entities.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn matching(&self, bbox: &BoundingBox, status: ListingStatus, limit: usize) -> Vec<SearchableEntity> {
        let entities = self.entities.read().unwrap_or_else(PoisonError::into_inner);
        entities
            .iter()
            .filter(|e| e.status == status)
            .filter(|e| e.location.is_some_and(|p| bbox.contains(&p)))
            .take(limit)
            .cloned()
            .collect()
    }
}

impl EntityStore for InMemoryStore {
    async fn query_in_bounding_box(
        &self,
        bbox: &BoundingBox,
        status: ListingStatus,
        limit: usize,
    ) -> Result<Vec<SearchableEntity>, StoreError> {
        Ok(self.matching(bbox, status, limit))
    }
}
