//! Error types for proximity search.

use crate::store::StoreError;
use souk_geo::GeoError;
use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors surfaced by [`crate::ProximitySearch`].
///
/// Nothing is retried internally; callers decide whether to retry, degrade to
/// cached results or report the failure.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The search center is not a valid coordinate
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] GeoError),

    /// The entity store query failed
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

impl SearchError {
    /// True when repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }

    /// Stable error code (11xxx range for search errors).
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidArgument(_) => 11001,
            Self::StoreUnavailable(_) => 11002,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        let invalid = SearchError::from(GeoError::InvalidCoordinate("latitude 91".into()));
        assert!(!invalid.is_retryable());
        assert_eq!(invalid.code(), 11001);

        let store = SearchError::from(StoreError::Timeout);
        assert!(store.is_retryable());
        assert_eq!(store.code(), 11002);
        assert_eq!(store.to_string(), "Store query timed out");
    }
}
