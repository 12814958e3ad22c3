//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use coursehub_core::error::CoreError;
use coursehub_core::roles::ROLE_AUTHOR;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `author` role. Rejects with 403 Forbidden otherwise.
///
/// Only gates the role. Whether the author owns a particular course is a
/// per-resource policy check in the services.
///
/// ```ignore
/// async fn create(RequireAuthor(user): RequireAuthor) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAuthor(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuthor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_AUTHOR {
            return Err(AppError::Core(CoreError::Forbidden(
                "Author role required".into(),
            )));
        }
        Ok(RequireAuthor(user))
    }
}
