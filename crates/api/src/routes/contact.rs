use axum::routing::get;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Contact routes mounted at `/contact`.
///
/// ```text
/// POST   /                 -> create_contact (public)
/// GET    /                 -> list_contacts (admin)
/// GET    /stats/overview   -> contact_stats (admin)
/// GET    /{id}             -> get_contact (admin)
/// PUT    /{id}             -> update_contact (admin)
/// DELETE /{id}             -> delete_contact (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(contact::list_contacts).post(contact::create_contact),
        )
        .route("/stats/overview", get(contact::contact_stats))
        .route(
            "/{id}",
            get(contact::get_contact)
                .put(contact::update_contact)
                .delete(contact::delete_contact),
        )
}
