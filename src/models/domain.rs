use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute key -> expected value, combined with logical AND
pub type FilterCriteria = BTreeMap<String, String>;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether both coordinates are finite and inside their valid ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A located facility (soil-testing center, mandi market, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub location: GeoPoint,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Descriptive payload, passed through untouched
    #[serde(default)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl CatalogEntry {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Record as it appears in a catalog source document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// A catalog source document: a named list of records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<CatalogRecord>,
}

/// Entry paired with its distance from the query point
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult<'a> {
    #[serde(flatten)]
    pub entry: &'a CatalogEntry,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

/// A single proximity query against one catalog
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub origin: GeoPoint,
    pub criteria: FilterCriteria,
    pub radius_km: Option<f64>,
    pub limit: Option<usize>,
}

/// Search tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    pub default_limit: usize,
    pub max_limit: usize,
    pub default_radius_km: Option<f64>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
            default_radius_km: None,
        }
    }
}

impl SearchQuery {
    pub fn new(origin: GeoPoint) -> Self {
        Self {
            origin,
            criteria: FilterCriteria::new(),
            radius_km: None,
            limit: None,
        }
    }

    pub fn with_criterion(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.criteria.insert(key.into(), value.into());
        self
    }

    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
