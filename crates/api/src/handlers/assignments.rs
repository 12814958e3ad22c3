//! Handlers for `/assignments/{id}`: CRUD, opening, and submissions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coursehub_core::types::DbId;
use coursehub_db::models::assignment::UpdateAssignment;
use coursehub_db::models::submission::SubmissionContent;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::services::{content, submissions};
use crate::state::AppState;

/// GET /api/v1/assignments/{id}
pub async fn get_assignment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(assignment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let assignment = content::get_assignment(&state.pool, &auth.actor(), assignment_id).await?;
    Ok(Json(DataResponse { data: assignment }))
}

/// PUT /api/v1/assignments/{id}
pub async fn update_assignment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(assignment_id): Path<DbId>,
    Json(input): Json<UpdateAssignment>,
) -> AppResult<impl IntoResponse> {
    let assignment =
        content::update_assignment(&state.pool, &auth.actor(), assignment_id, &input).await?;
    Ok(Json(DataResponse { data: assignment }))
}

/// DELETE /api/v1/assignments/{id}
pub async fn delete_assignment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(assignment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    content::delete_assignment(&state.pool, &auth.actor(), assignment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/assignments/{id}/open
///
/// 201 on the first open, 200 with the existing record afterwards.
pub async fn open_assignment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(assignment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let opened = submissions::open_assignment(&state.pool, auth.user_id, assignment_id).await?;
    let status = if opened.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: opened })))
}

/// GET /api/v1/assignments/{id}/open
pub async fn get_open_record(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(assignment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = submissions::get_open_record(&state.pool, auth.user_id, assignment_id).await?;
    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/assignments/{id}/submissions
pub async fn list_submissions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(assignment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let list =
        submissions::list_for_assignment(&state.pool, &auth.actor(), assignment_id).await?;
    Ok(Json(DataResponse { data: list }))
}

/// POST /api/v1/assignments/{id}/submissions
pub async fn submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(assignment_id): Path<DbId>,
    Json(input): Json<SubmissionContent>,
) -> AppResult<impl IntoResponse> {
    let submission = submissions::submit(
        &state.pool,
        &state.event_bus,
        auth.user_id,
        assignment_id,
        &input.content_url,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: submission })))
}
