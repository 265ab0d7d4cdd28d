//! Handlers for the `/auth` resource (login, current user, password change).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use showcase_core::error::CoreError;
use showcase_core::types::DbId;
use showcase_db::models::user::UserResponse;
use showcase_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `PUT /auth/password`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Successful authentication response returned by login and password change.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

const INVALID_CREDENTIALS: &str = "Invalid email or password";

fn issue_token(state: &AppState, user_id: DbId, role: &str) -> AppResult<String> {
    generate_access_token(user_id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate with email + password. Unknown emails and wrong passwords
/// get the same 401.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Failed login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    UserRepo::record_login(&state.pool, user.id).await?;
    let token = issue_token(&state, user.id, &user.role)?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(AuthResponse {
        token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: user.into(),
    }))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> AppResult<Json<DataResponse<UserResponse>>> {
    Ok(Json(DataResponse {
        data: auth.user.into(),
    }))
}

/// PUT /api/auth/password
///
/// Verify the current password, store the new one and return a fresh token.
/// Tokens issued before the change stop working.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<ChangePasswordRequest>,
) -> AppResult<Json<AuthResponse>> {
    let current_valid = verify_password(&input.current_password, &auth.user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::update_password(&state.pool, auth.user_id, &new_hash, Utc::now())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let token = issue_token(&state, user.id, &user.role)?;

    tracing::info!(user_id = user.id, "Password changed");

    Ok(Json(AuthResponse {
        token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: user.into(),
    }))
}
