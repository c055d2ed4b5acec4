use actix_web::{web, HttpResponse, Responder};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use validator::Validate;

use crate::core::{filter_entries, Catalog, CatalogRegistry, Locator};
use crate::error::CatalogError;
use crate::models::{
    filters_from_params, ApiResponse, AttributeValuesData, CatalogSummary, ErrorResponse,
    HealthResponse, ListingData, NearbyData, NearbyRequest,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalogs: Arc<CatalogRegistry>,
    pub locator: Locator,
}

/// Configure all catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/catalogs", web::get().to(list_catalogs))
        .route("/catalogs/{catalog}/nearby", web::get().to(find_nearby))
        .route("/catalogs/{catalog}/entries", web::get().to(list_entries))
        .route("/catalogs/{catalog}/entries/{id}", web::get().to(get_entry))
        .route("/catalogs/{catalog}/attributes/{key}", web::get().to(attribute_values));
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::bad_request(error, message))
}

fn catalog_error(err: CatalogError) -> HttpResponse {
    if err.is_not_found() {
        HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: err.to_string(),
            status_code: 404,
        })
    } else {
        tracing::error!("Catalog error: {}", err);
        HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Internal error".to_string(),
            message: err.to_string(),
            status_code: 500,
        })
    }
}

fn lookup<'a>(state: &'a AppState, name: &str) -> Result<&'a Arc<Catalog>, HttpResponse> {
    state.catalogs.get(name).map_err(|e| {
        tracing::info!("Request for unknown catalog {}", name);
        catalog_error(e)
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let catalogs: BTreeMap<String, usize> = state
        .catalogs
        .iter()
        .map(|catalog| (catalog.name().to_string(), catalog.len()))
        .collect();

    let status = if catalogs.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalogs,
    })
}

/// GET /api/v1/catalogs
async fn list_catalogs(state: web::Data<AppState>) -> impl Responder {
    let catalogs: Vec<CatalogSummary> = state
        .catalogs
        .iter()
        .map(|catalog| CatalogSummary {
            name: catalog.name().to_string(),
            total: catalog.len(),
        })
        .collect();

    HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({ "catalogs": catalogs })))
}

/// Nearest entries to a point
///
/// GET /api/v1/catalogs/{catalog}/nearby?latitude=12.97&longitude=77.59&radius=50&state=Karnataka
async fn find_nearby(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let catalog = match lookup(&state, &path) {
        Ok(catalog) => catalog,
        Err(response) => return response,
    };

    let req = match NearbyRequest::from_params(&query) {
        Ok(req) => req,
        Err(e) => return bad_request("Invalid query", e.to_string()),
    };

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for nearby request: field_errors={:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    tracing::info!(
        "Nearby search in {} at ({}, {}), radius: {:?}, filters: {:?}",
        catalog.name(),
        req.latitude,
        req.longitude,
        req.radius,
        req.filters
    );

    let result = state.locator.search(catalog, &req.to_search_query());

    HttpResponse::Ok().json(ApiResponse::ok(NearbyData {
        total: result.results.len(),
        items: result.results,
        filters: req.filters,
    }))
}

/// Filter-only listing, catalog order
///
/// GET /api/v1/catalogs/{catalog}/entries?state=Karnataka&city=Mysuru
async fn list_entries(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let catalog = match lookup(&state, &path) {
        Ok(catalog) => catalog,
        Err(response) => return response,
    };

    let filters = filters_from_params(&query);
    let items = filter_entries(catalog.all(), &filters);

    tracing::debug!("Listing {} of {} entries in {}", items.len(), catalog.len(), catalog.name());

    HttpResponse::Ok().json(ApiResponse::ok(ListingData {
        total: items.len(),
        items,
        filters,
    }))
}

/// GET /api/v1/catalogs/{catalog}/entries/{id}
async fn get_entry(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (name, id) = path.into_inner();

    let catalog = match lookup(&state, &name) {
        Ok(catalog) => catalog,
        Err(response) => return response,
    };

    match catalog.by_id(&id) {
        Ok(entry) => HttpResponse::Ok().json(ApiResponse::ok(entry)),
        Err(e) => catalog_error(e),
    }
}

/// Distinct values of an attribute, e.g. the states a catalog covers
///
/// GET /api/v1/catalogs/{catalog}/attributes/{key}
async fn attribute_values(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (name, key) = path.into_inner();

    let catalog = match lookup(&state, &name) {
        Ok(catalog) => catalog,
        Err(response) => return response,
    };

    let values = catalog.distinct_values(&key);

    HttpResponse::Ok().json(ApiResponse::ok(AttributeValuesData { key, values }))
}
