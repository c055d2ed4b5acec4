// Route exports
pub mod catalogs;
pub mod language;

use actix_web::web;

pub use catalogs::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(catalogs::configure),
    );
}
