//! Handlers scoped to the calling user (`/me`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coursehub_db::models::topup::CreateTopup;
use coursehub_db::repositories::{CourseRepo, TopupRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuthor;
use crate::response::DataResponse;
use crate::services::{accounts, wallet};
use crate::state::AppState;

/// GET /api/v1/me
pub async fn profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let user = accounts::profile(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/me/courses
///
/// Courses the caller is enrolled in.
pub async fn enrolled_courses(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let courses = CourseRepo::list_enrolled(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// GET /api/v1/me/authored-courses
///
/// Courses the caller authored or co-instructs, in every status.
pub async fn authored_courses(
    RequireAuthor(auth): RequireAuthor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let courses = CourseRepo::list_for_instructor(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// POST /api/v1/me/topups
pub async fn top_up(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTopup>,
) -> AppResult<impl IntoResponse> {
    let receipt = wallet::top_up(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}

/// GET /api/v1/me/topups
pub async fn topup_history(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let history = TopupRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: history }))
}
