// Service exports
pub mod catalog_source;

pub use catalog_source::{builtin_document, parse_document, CatalogLoader};
