use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::service;
use crate::state::AppState;

/// Service routes mounted at `/services`.
///
/// ```text
/// GET    /                 -> list_services
/// POST   /                 -> create_service (admin, multipart)
/// GET    /categories/all   -> service_categories
/// GET    /featured/all     -> featured_services
/// GET    /{id}             -> get_service
/// PUT    /{id}             -> update_service (admin, multipart)
/// DELETE /{id}             -> delete_service (admin)
/// ```
pub fn router(body_limit: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(service::list_services).post(service::create_service),
        )
        .route("/categories/all", get(service::service_categories))
        .route("/featured/all", get(service::featured_services))
        .route(
            "/{id}",
            get(service::get_service)
                .put(service::update_service)
                .delete(service::delete_service),
        )
        .layer(DefaultBodyLimit::max(body_limit))
}
