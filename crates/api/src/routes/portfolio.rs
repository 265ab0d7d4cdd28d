use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::portfolio;
use crate::state::AppState;

/// Portfolio routes mounted at `/portfolio`.
///
/// ```text
/// GET    /                 -> list_portfolio
/// POST   /                 -> create_portfolio_item (admin, multipart)
/// GET    /categories/all   -> portfolio_categories
/// GET    /featured/all     -> featured_portfolio
/// GET    /{id}             -> get_portfolio_item
/// PUT    /{id}             -> update_portfolio_item (admin, multipart)
/// DELETE /{id}             -> delete_portfolio_item (admin)
/// ```
pub fn router(body_limit: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(portfolio::list_portfolio).post(portfolio::create_portfolio_item),
        )
        .route("/categories/all", get(portfolio::portfolio_categories))
        .route("/featured/all", get(portfolio::featured_portfolio))
        .route(
            "/{id}",
            get(portfolio::get_portfolio_item)
                .put(portfolio::update_portfolio_item)
                .delete(portfolio::delete_portfolio_item),
        )
        .layer(DefaultBodyLimit::max(body_limit))
}
