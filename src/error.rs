use thiserror::Error;

/// Errors raised while loading or looking up catalogs
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Entry {id} not found in catalog {catalog}")]
    NotFound { catalog: String, id: String },

    #[error("Unknown catalog: {0}")]
    UnknownCatalog(String),

    #[error("Duplicate entry id {id} in catalog {catalog}")]
    DuplicateId { catalog: String, id: String },

    #[error("Catalog {0} is registered more than once")]
    DuplicateCatalog(String),

    #[error("Entry {index} of catalog {catalog} has an invalid location ({latitude}, {longitude})")]
    InvalidLocation {
        catalog: String,
        index: usize,
        latitude: f64,
        longitude: f64,
    },

    #[error("No source configured for catalog {0}")]
    MissingSource(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. } | CatalogError::UnknownCatalog(_))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
