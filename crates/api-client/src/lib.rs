//! Hosted-backend access for Souk
//!
//! This crate talks to the Supabase REST interface (PostgREST) and exposes the
//! listings table as an [`souk_proximity::EntityStore`], so nearby search runs
//! against production data without the search code knowing about HTTP.
//!
//! # Example
//!
//! ```rust,no_run
//! use souk_api_client::SoukClient;
//! use souk_geo::GeoPoint;
//! use souk_proximity::ProximitySearch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // SUPABASE_URL, SUPABASE_ANON_KEY, SOUK_ENV ...
//!     let client = SoukClient::new()?;
//!     let search = ProximitySearch::new(client.listings());
//!
//!     let nearby = search.search(GeoPoint::new(33.5731, -7.5898), 10.0, 24).await?;
//!     println!("{} listings nearby", nearby.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod listings;

pub use client::SoukClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};
pub use listings::{ListingRow, SupabaseListingStore};
