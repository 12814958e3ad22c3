//! Handlers for `/courses/{id}/reviews`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coursehub_core::types::DbId;
use coursehub_db::models::review::CreateCourseReview;
use coursehub_db::repositories::ReviewRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::services::access::CourseContext;
use crate::services::reviews;
use crate::state::AppState;

/// GET /api/v1/courses/{id}/reviews
///
/// Newest first, with reviewer name and role. Public.
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    CourseContext::load(&state.pool, course_id).await?;
    let list = ReviewRepo::list_by_course(&state.pool, course_id).await?;
    Ok(Json(DataResponse { data: list }))
}

/// POST /api/v1/courses/{id}/reviews
pub async fn create_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<CreateCourseReview>,
) -> AppResult<impl IntoResponse> {
    let review = reviews::create_review(&state.pool, auth.user_id, course_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}
