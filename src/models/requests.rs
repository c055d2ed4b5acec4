use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use validator::Validate;

use crate::models::domain::{FilterCriteria, GeoPoint, SearchQuery};

/// Query keys that are not attribute filters
const RESERVED_KEYS: &[&str] = &["latitude", "longitude", "lat", "lon", "lng", "radius", "limit", "lang"];

/// Errors raised while turning raw query parameters into a request
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("missing required parameter: {0}")]
    Missing(&'static str),

    #[error("parameter {name} must be a number, got {value:?}")]
    NotANumber { name: &'static str, value: String },
}

/// Nearby search request
///
/// GET /api/v1/catalogs/{catalog}/nearby?latitude=..&longitude=..&radius=..&limit=..&state=..
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0.0))]
    pub radius: Option<f64>,
    #[validate(range(min = 1))]
    pub limit: Option<usize>,
    #[serde(default)]
    pub filters: FilterCriteria,
}

impl NearbyRequest {
    /// Build from raw query parameters. Every non-reserved key becomes a filter.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, QueryError> {
        let latitude = required_number(params, "latitude", &["lat"])?;
        let longitude = required_number(params, "longitude", &["lon", "lng"])?;
        let radius = optional_number(params, "radius")?;
        let limit = match params.get("limit").map(|v| v.trim()).filter(|v| !v.is_empty()) {
            Some(raw) => Some(raw.parse::<usize>().map_err(|_| QueryError::NotANumber {
                name: "limit",
                value: raw.to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            latitude,
            longitude,
            radius,
            limit,
            filters: filters_from_params(params),
        })
    }

    pub fn origin(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn to_search_query(&self) -> SearchQuery {
        SearchQuery {
            origin: self.origin(),
            criteria: self.filters.clone(),
            radius_km: self.radius,
            limit: self.limit,
        }
    }
}

/// Attribute filters from raw query parameters, reserved keys removed
pub fn filters_from_params(params: &HashMap<String, String>) -> FilterCriteria {
    params
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn required_number(
    params: &HashMap<String, String>,
    name: &'static str,
    aliases: &[&str],
) -> Result<f64, QueryError> {
    let raw = std::iter::once(name)
        .chain(aliases.iter().copied())
        .find_map(|key| params.get(key))
        .ok_or(QueryError::Missing(name))?;

    parse_number(name, raw)
}

fn optional_number(
    params: &HashMap<String, String>,
    name: &'static str,
) -> Result<Option<f64>, QueryError> {
    match params.get(name).filter(|v| !v.trim().is_empty()) {
        Some(raw) => parse_number(name, raw).map(Some),
        None => Ok(None),
    }
}

fn parse_number(name: &'static str, raw: &str) -> Result<f64, QueryError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| QueryError::NotANumber {
            name,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_parses_coordinates_and_filters() {
        let req = NearbyRequest::from_params(&params(&[
            ("latitude", "12.97"),
            ("longitude", "77.59"),
            ("radius", "50"),
            ("state", "Karnataka"),
            ("lang", "kn"),
        ]))
        .unwrap();

        assert_eq!(req.origin(), GeoPoint::new(12.97, 77.59));
        assert_eq!(req.radius, Some(50.0));
        assert_eq!(req.filters.len(), 1);
        assert_eq!(req.filters.get("state").map(String::as_str), Some("Karnataka"));
    }

    #[test]
    fn test_short_aliases() {
        let req = NearbyRequest::from_params(&params(&[("lat", "1.5"), ("lng", "2.5")])).unwrap();
        assert_eq!(req.origin(), GeoPoint::new(1.5, 2.5));
    }

    #[test]
    fn test_missing_latitude() {
        let err = NearbyRequest::from_params(&params(&[("longitude", "77.0")])).unwrap_err();
        assert_eq!(err, QueryError::Missing("latitude"));
    }

    #[test]
    fn test_non_numeric_radius() {
        let err = NearbyRequest::from_params(&params(&[
            ("latitude", "12.0"),
            ("longitude", "77.0"),
            ("radius", "far"),
        ]))
        .unwrap_err();
        assert!(matches!(err, QueryError::NotANumber { name: "radius", .. }));
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        let req = NearbyRequest::from_params(&params(&[("latitude", "123.0"), ("longitude", "77.0")])).unwrap();
        assert!(req.validate().is_err());

        let req = NearbyRequest::from_params(&params(&[
            ("latitude", "12.0"),
            ("longitude", "77.0"),
            ("radius", "-1"),
        ]))
        .unwrap();
        assert!(req.validate().is_err());
    }
}
