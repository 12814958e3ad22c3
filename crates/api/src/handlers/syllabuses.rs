//! Handlers for `/syllabuses/{id}` and the materials/assignments under it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coursehub_core::types::DbId;
use coursehub_db::models::assignment::CreateAssignment;
use coursehub_db::models::syllabus::UpdateSyllabus;
use coursehub_db::models::syllabus_material::CreateSyllabusMaterial;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::services::{content, progress};
use crate::state::AppState;

/// GET /api/v1/syllabuses/{id}
pub async fn get_syllabus(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(syllabus_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = content::syllabus_detail(&state.pool, &auth.actor(), syllabus_id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/syllabuses/{id}
pub async fn update_syllabus(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(syllabus_id): Path<DbId>,
    Json(input): Json<UpdateSyllabus>,
) -> AppResult<impl IntoResponse> {
    let syllabus =
        content::update_syllabus(&state.pool, &auth.actor(), syllabus_id, &input).await?;
    Ok(Json(DataResponse { data: syllabus }))
}

/// DELETE /api/v1/syllabuses/{id}
///
/// Later syllabuses of the course move up one position.
pub async fn delete_syllabus(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(syllabus_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    content::delete_syllabus(&state.pool, &auth.actor(), syllabus_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/syllabuses/{id}/access
///
/// Record that the caller opened the syllabus. Fails with 400
/// `INVALID_STATE` while an earlier syllabus is incomplete.
pub async fn record_access(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(syllabus_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = progress::record_access(&state.pool, auth.user_id, syllabus_id).await?;
    Ok(Json(DataResponse { data: row }))
}

/// GET /api/v1/syllabuses/{id}/materials
pub async fn list_materials(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(syllabus_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let materials = content::list_materials(&state.pool, &auth.actor(), syllabus_id).await?;
    Ok(Json(DataResponse { data: materials }))
}

/// POST /api/v1/syllabuses/{id}/materials
pub async fn create_material(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(syllabus_id): Path<DbId>,
    Json(input): Json<CreateSyllabusMaterial>,
) -> AppResult<impl IntoResponse> {
    let material =
        content::create_material(&state.pool, &auth.actor(), syllabus_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: material })))
}

/// POST /api/v1/syllabuses/{id}/assignments
pub async fn create_assignment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(syllabus_id): Path<DbId>,
    Json(input): Json<CreateAssignment>,
) -> AppResult<impl IntoResponse> {
    let assignment =
        content::create_assignment(&state.pool, &auth.actor(), syllabus_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}
