// Core algorithm exports
pub mod catalog;
pub mod distance;
pub mod filters;
pub mod locator;
pub mod ranker;

pub use catalog::{Catalog, CatalogRegistry};
pub use distance::haversine_distance;
pub use filters::{filter_entries, matches_criteria};
pub use locator::{Locator, SearchResult};
pub use ranker::rank;
