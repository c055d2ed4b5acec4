use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use agriguru_locator::config::{LoggingSettings, Settings};
use agriguru_locator::models::ErrorResponse;
use agriguru_locator::routes::{self, language, AppState};
use agriguru_locator::services::CatalogLoader;
use agriguru_locator::Locator;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// Handle query payload errors
pub fn handle_query_payload_error(err: actix_web::error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    ErrorResponse::bad_request("invalid_query", format!("Invalid query: {}", err)).into()
}

fn init_logging(settings: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting AgriGuru locator service...");

    // Catalogs are loaded once and never change afterwards
    let loader = CatalogLoader::new(Duration::from_secs(30))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let registry = match loader.load_all(&settings.catalogs).await {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            error!("Failed to load catalogs: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    info!("Loaded {} catalogs: {:?}", registry.len(), registry.names().collect::<Vec<_>>());

    let locator = Locator::new(settings.search.limits());

    info!("Locator initialized with limits: {:?}", locator.limits());

    let app_state = AppState {
        catalogs: registry,
        locator,
    };
    let i18n = web::Data::new(settings.i18n.clone());

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(i18n.clone())
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(middleware::from_fn(language::content_language))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
