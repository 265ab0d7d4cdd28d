pub mod auth;
pub mod contact;
pub mod health;
pub mod portfolio;
pub mod service;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Room left in a multipart body for the text fields next to one image.
pub const FORM_FIELDS_ALLOWANCE_BYTES: usize = 1024 * 1024;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
/// /auth/me                         current user (requires auth)
/// /auth/password                   change password (requires auth)
///
/// /contact                         submit (public), list (admin)
/// /contact/stats/overview          status counts (admin)
/// /contact/{id}                    get, update, delete (admin)
///
/// /portfolio                       list (public), create (admin)
/// /portfolio/categories/all        category counts (public)
/// /portfolio/featured/all          featured items (public)
/// /portfolio/{id}                  get (public), update, delete (admin)
///
/// /services                        list (public), create (admin)
/// /services/categories/all         category counts (public)
/// /services/featured/all           featured services (public)
/// /services/{id}                   get (public), update, delete (admin)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    let body_limit = config.max_upload_bytes + FORM_FIELDS_ALLOWANCE_BYTES;

    Router::new()
        .nest("/auth", auth::router())
        .nest("/contact", contact::router())
        .nest("/portfolio", portfolio::router(body_limit))
        .nest("/services", service::router(body_limit))
}
