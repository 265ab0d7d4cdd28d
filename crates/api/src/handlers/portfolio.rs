//! Handlers for the `/portfolio` resource.
//!
//! Reads are public and only ever list active items. Writes are admin-only
//! and take `multipart/form-data` with an optional `image` file.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use showcase_core::content::{validate_portfolio_category, FEATURED_LIMIT};
use showcase_core::error::CoreError;
use showcase_core::pagination::DEFAULT_PORTFOLIO_LIMIT;
use showcase_core::types::DbId;
use showcase_db::models::portfolio::PortfolioFilter;
use showcase_db::repositories::PortfolioRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ContentListParams;
use crate::response::{DataResponse, MessageResponse, PagedResponse, Pagination};
use crate::state::AppState;
use crate::upload::{discard_image, store_image, ContentForm};

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Portfolio item",
        id,
    })
}

/// Store the form's image, if any, returning its public path.
async fn store_form_image(state: &AppState, form: &ContentForm) -> AppResult<Option<String>> {
    match &form.image {
        Some(file) => Ok(Some(
            store_image(&state.config.upload_dir, file, state.config.max_upload_bytes).await?,
        )),
        None => Ok(None),
    }
}

/// Remove an image stored for a write that did not reach the database.
async fn discard_form_image(state: &AppState, image: Option<&str>) {
    if let Some(path) = image {
        discard_image(&state.config.upload_dir, path).await;
    }
}

/// GET /api/portfolio
///
/// Supports `category`, `featured=true`, `search`, `page` and `limit`.
pub async fn list_portfolio(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ContentListParams>,
) -> AppResult<impl IntoResponse> {
    let category = params.category();
    if let Some(category) = &category {
        validate_portfolio_category(category)?;
    }
    let filter = PortfolioFilter {
        category,
        featured: params.featured_only(),
        search: params.search(),
    };
    let page = params.page_request(DEFAULT_PORTFOLIO_LIMIT);

    let total = PortfolioRepo::count(&state.pool, &filter).await?;
    let items = PortfolioRepo::list(&state.pool, &filter, page.limit, page.offset()).await?;

    Ok(Json(PagedResponse {
        data: items,
        pagination: Pagination::new(&page, total, "totalProjects"),
    }))
}

/// GET /api/portfolio/{id}
pub async fn get_portfolio_item(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = PortfolioRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: item }))
}

/// GET /api/portfolio/categories/all
pub async fn portfolio_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = PortfolioRepo::categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/portfolio/featured/all
pub async fn featured_portfolio(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = PortfolioRepo::featured(&state.pool, FEATURED_LIMIT).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/portfolio
///
/// The uploaded image becomes the thumbnail and the first gallery image.
pub async fn create_portfolio_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = ContentForm::from_multipart(&mut multipart).await?;
    let input = form.portfolio_input()?.into_validated()?;
    let image = store_form_image(&state, &form).await?;

    let item = match PortfolioRepo::create(&state.pool, &input, image.as_deref()).await {
        Ok(item) => item,
        Err(e) => {
            discard_form_image(&state, image.as_deref()).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        portfolio_id = item.id,
        title = %item.title,
        user_id = admin.user_id,
        "Portfolio item created",
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Portfolio item created successfully".to_string(),
            data: Some(item),
        }),
    ))
}

/// PUT /api/portfolio/{id}
///
/// Replaces the text fields. A new image replaces the thumbnail and is
/// appended to the gallery.
pub async fn update_portfolio_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = ContentForm::from_multipart(&mut multipart).await?;
    let input = form.portfolio_input()?.into_validated()?;

    if PortfolioRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    let image = store_form_image(&state, &form).await?;

    let item = match PortfolioRepo::update(&state.pool, id, &input, image.as_deref()).await {
        Ok(Some(item)) => item,
        Ok(None) => {
            discard_form_image(&state, image.as_deref()).await;
            return Err(not_found(id));
        }
        Err(e) => {
            discard_form_image(&state, image.as_deref()).await;
            return Err(e.into());
        }
    };

    tracing::info!(portfolio_id = id, user_id = admin.user_id, "Portfolio item updated");

    Ok(Json(MessageResponse {
        message: "Portfolio item updated successfully".to_string(),
        data: Some(item),
    }))
}

/// DELETE /api/portfolio/{id}
pub async fn delete_portfolio_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !PortfolioRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(portfolio_id = id, user_id = admin.user_id, "Portfolio item deleted");

    Ok(Json(MessageResponse::message(
        "Portfolio item deleted successfully",
    )))
}
