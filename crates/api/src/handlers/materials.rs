//! Handlers for `/materials/{id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coursehub_core::types::DbId;
use coursehub_db::models::syllabus_material::UpdateSyllabusMaterial;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::services::content;
use crate::state::AppState;

/// GET /api/v1/materials/{id}
pub async fn get_material(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(material_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let material = content::get_material(&state.pool, &auth.actor(), material_id).await?;
    Ok(Json(DataResponse { data: material }))
}

/// PUT /api/v1/materials/{id}
pub async fn update_material(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(material_id): Path<DbId>,
    Json(input): Json<UpdateSyllabusMaterial>,
) -> AppResult<impl IntoResponse> {
    let material =
        content::update_material(&state.pool, &auth.actor(), material_id, &input).await?;
    Ok(Json(DataResponse { data: material }))
}

/// DELETE /api/v1/materials/{id}
pub async fn delete_material(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(material_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    content::delete_material(&state.pool, &auth.actor(), material_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
