//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and checks its role against an
//! allow-list with [`showcase_core::roles::authorize`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use showcase_core::roles::{authorize, STAFF_ROLES};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `ADMIN` or `SUPERADMIN` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        authorize(user.role, STAFF_ROLES)?;
        Ok(RequireAdmin(user))
    }
}
