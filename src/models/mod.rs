// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CatalogDocument, CatalogEntry, CatalogRecord, FilterCriteria, GeoPoint, RankedResult, SearchLimits, SearchQuery};
pub use requests::{filters_from_params, NearbyRequest, QueryError};
pub use responses::{ApiResponse, AttributeValuesData, CatalogSummary, ErrorResponse, HealthResponse, ListingData, NearbyData};
