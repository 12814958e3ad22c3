//! Handlers for the per-course discussion forum.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coursehub_core::error::CoreError;
use coursehub_core::types::DbId;
use coursehub_db::models::forum_post::CreateForumPost;
use coursehub_db::repositories::ForumPostRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::services::access::CourseContext;
use crate::state::AppState;

/// GET /api/v1/courses/{id}/forum-posts
pub async fn list_posts(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    CourseContext::load(&state.pool, course_id).await?;
    let posts = ForumPostRepo::list_by_course(&state.pool, course_id).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// POST /api/v1/courses/{id}/forum-posts
pub async fn create_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<CreateForumPost>,
) -> AppResult<impl IntoResponse> {
    let content = input.content.trim();
    if content.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "content must not be empty".into(),
        )));
    }
    CourseContext::load(&state.pool, course_id).await?;

    let post = ForumPostRepo::create(&state.pool, course_id, auth.user_id, content).await?;
    tracing::info!(post_id = post.id, course_id, user_id = auth.user_id, "Forum post created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}
