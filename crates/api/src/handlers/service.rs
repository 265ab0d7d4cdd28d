//! Handlers for the `/services` resource.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use showcase_core::content::{validate_service_category, FEATURED_LIMIT};
use showcase_core::error::CoreError;
use showcase_core::pagination::DEFAULT_SERVICE_LIMIT;
use showcase_core::types::DbId;
use showcase_db::models::service::ServiceFilter;
use showcase_db::repositories::ServiceRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ContentListParams;
use crate::response::{DataResponse, MessageResponse, PagedResponse, Pagination};
use crate::state::AppState;
use crate::upload::{discard_image, store_image, ContentForm};

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Service",
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

/// GET /api/services
///
/// Supports `category`, `featured=true`, `page` and `limit`.
pub async fn list_services(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ContentListParams>,
) -> AppResult<impl IntoResponse> {
    let category = params.category();
    if let Some(category) = &category {
        validate_service_category(category)?;
    }
    let filter = ServiceFilter {
        category,
        featured: params.featured_only(),
    };
    let page = params.page_request(DEFAULT_SERVICE_LIMIT);

    let total = ServiceRepo::count(&state.pool, &filter).await?;
    let services = ServiceRepo::list(&state.pool, &filter, page.limit, page.offset()).await?;

    Ok(Json(PagedResponse {
        data: services,
        pagination: Pagination::new(&page, total, "totalServices"),
    }))
}

/// GET /api/services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: service }))
}

/// GET /api/services/categories/all
pub async fn service_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = ServiceRepo::categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/services/featured/all
pub async fn featured_services(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let services = ServiceRepo::featured(&state.pool, FEATURED_LIMIT).await?;
    Ok(Json(DataResponse { data: services }))
}

/// POST /api/services
pub async fn create_service(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = ContentForm::from_multipart(&mut multipart).await?;
    let input = form.service_input()?.into_validated()?;
    let image = store_form_image(&state, &form).await?;

    let service = match ServiceRepo::create(&state.pool, &input, image.as_deref()).await {
        Ok(service) => service,
        Err(e) => {
            discard_form_image(&state, image.as_deref()).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        service_id = service.id,
        title = %service.title,
        user_id = admin.user_id,
        "Service created",
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Service created successfully".to_string(),
            data: Some(service),
        }),
    ))
}

/// PUT /api/services/{id}
///
/// Replaces the text fields; a new image replaces the old one.
pub async fn update_service(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = ContentForm::from_multipart(&mut multipart).await?;
    let input = form.service_input()?.into_validated()?;

    if ServiceRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    let image = store_form_image(&state, &form).await?;

    let service = match ServiceRepo::update(&state.pool, id, &input, image.as_deref()).await {
        Ok(Some(service)) => service,
        Ok(None) => {
            discard_form_image(&state, image.as_deref()).await;
            return Err(not_found(id));
        }
        Err(e) => {
            discard_form_image(&state, image.as_deref()).await;
            return Err(e.into());
        }
    };

    tracing::info!(service_id = id, user_id = admin.user_id, "Service updated");

    Ok(Json(MessageResponse {
        message: "Service updated successfully".to_string(),
        data: Some(service),
    }))
}

/// DELETE /api/services/{id}
pub async fn delete_service(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ServiceRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(service_id = id, user_id = admin.user_id, "Service deleted");

    Ok(Json(MessageResponse::message("Service deleted successfully")))
}
