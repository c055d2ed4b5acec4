use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::domain::{CatalogEntry, FilterCriteria, RankedResult};

/// Standard success envelope: `{ success, data }`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Payload of a nearby search
#[derive(Debug, Clone, Serialize)]
pub struct NearbyData<'a> {
    pub items: Vec<RankedResult<'a>>,
    pub total: usize,
    pub filters: FilterCriteria,
}

/// Payload of a filter-only listing
#[derive(Debug, Clone, Serialize)]
pub struct ListingData<'a> {
    pub items: Vec<&'a CatalogEntry>,
    pub total: usize,
    pub filters: FilterCriteria,
}

/// Distinct values of one attribute
#[derive(Debug, Clone, Serialize)]
pub struct AttributeValuesData {
    pub key: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub name: String,
    pub total: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub catalogs: BTreeMap<String, usize>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn bad_request(error: &str, message: String) -> Self {
        Self {
            error: error.to_string(),
            message,
            status_code: 400,
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

impl ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}
