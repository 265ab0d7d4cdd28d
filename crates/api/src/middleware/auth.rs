//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use showcase_core::error::CoreError;
use showcase_core::roles::Role;
use showcase_core::types::DbId;
use showcase_db::models::user::User;
use showcase_db::repositories::UserRepo;

use crate::auth::jwt::{validate_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// The token only identifies the user: the account is re-loaded on every
/// request, so deactivation, deletion, role changes and password changes
/// take effect immediately.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's current role, read from the database.
    pub role: Role,
    /// The full user row.
    pub user: User,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Not authorized, no token"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            unauthorized("Invalid Authorization format. Expected: Bearer <token>")
        })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| unauthorized("User no longer exists"))?;

        check_account(&user, &claims)?;

        let role: Role = user.role.parse()?;
        Ok(AuthUser {
            user_id: user.id,
            role,
            user,
        })
    }
}

/// Reject inactive accounts and tokens issued before the last password change.
fn check_account(user: &User, claims: &Claims) -> Result<(), AppError> {
    if !user.is_active {
        return Err(unauthorized("Account is deactivated"));
    }
    if let Some(changed_at) = user.password_changed_at {
        // `iat` has whole-second precision.
        if claims.iat < changed_at.timestamp() {
            return Err(unauthorized(
                "Password was changed recently. Please log in again",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn user(is_active: bool, password_changed_at: Option<chrono::DateTime<Utc>>) -> User {
        let now = Utc::now();
        User {
            id: 1,
            name: "Admin".into(),
            email: "admin@example.com".into(),
            password_hash: String::new(),
            role: "ADMIN".into(),
            is_active,
            last_login_at: None,
            password_changed_at,
            created_at: now,
            updated_at: now,
        }
    }

    fn claims(iat: i64) -> Claims {
        Claims {
            sub: 1,
            role: "ADMIN".into(),
            exp: iat + 3600,
            iat,
            jti: "test".into(),
        }
    }

    #[test]
    fn active_user_without_password_change_passes() {
        let now = Utc::now().timestamp();
        assert!(check_account(&user(true, None), &claims(now)).is_ok());
    }

    #[test]
    fn inactive_user_is_rejected() {
        let now = Utc::now().timestamp();
        assert!(check_account(&user(false, None), &claims(now)).is_err());
    }

    #[test]
    fn token_older_than_password_change_is_rejected() {
        let changed = Utc::now();
        let stale = claims((changed - Duration::minutes(5)).timestamp());
        assert!(check_account(&user(true, Some(changed)), &stale).is_err());

        let fresh = claims(changed.timestamp());
        assert!(check_account(&user(true, Some(changed)), &fresh).is_ok());
    }
}
