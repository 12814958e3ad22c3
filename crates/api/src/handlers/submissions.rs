//! Handlers for `/submissions/{id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coursehub_core::types::DbId;
use coursehub_db::models::submission::{GradeSubmission, SubmissionContent};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::services::submissions;
use crate::state::AppState;

/// PUT /api/v1/submissions/{id}
///
/// Only the submitter, and only before grading.
pub async fn revise_submission(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
    Json(input): Json<SubmissionContent>,
) -> AppResult<impl IntoResponse> {
    let submission =
        submissions::revise(&state.pool, &auth.actor(), submission_id, &input.content_url)
            .await?;
    Ok(Json(DataResponse { data: submission }))
}

/// DELETE /api/v1/submissions/{id}
pub async fn delete_submission(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    submissions::delete(&state.pool, &auth.actor(), submission_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/submissions/{id}/grade
pub async fn grade_submission(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
    Json(input): Json<GradeSubmission>,
) -> AppResult<impl IntoResponse> {
    let submission =
        submissions::grade(&state.pool, &auth.actor(), submission_id, input.grade).await?;
    Ok(Json(DataResponse { data: submission }))
}
