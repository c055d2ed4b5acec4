//! AgriGuru Locator - proximity search over static facility catalogs
//!
//! Finds the soil-testing centers and mandi markets nearest to a farmer,
//! optionally narrowed by state, city or type and bounded by a radius.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{haversine_distance, filter_entries, rank, Catalog, CatalogRegistry, Locator, SearchResult};
pub use error::CatalogError;
pub use models::{CatalogEntry, FilterCriteria, GeoPoint, RankedResult, SearchLimits, SearchQuery};
