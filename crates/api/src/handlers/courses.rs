//! Handlers for `/courses`: catalog, lifecycle, instructors, enrollment and
//! per-course progress.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coursehub_core::status::CourseStatus;
use coursehub_core::types::DbId;
use coursehub_db::models::course::{AddInstructors, CourseSearch, CreateCourse, UpdateCourse};
use coursehub_db::models::syllabus::CreateSyllabus;
use coursehub_db::repositories::{CourseInstructorRepo, CourseRepo};

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::rbac::RequireAuthor;
use crate::response::DataResponse;
use crate::services::access::CourseContext;
use crate::services::{content, courses, enrollment, progress};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// GET /api/v1/courses
///
/// Active courses, newest first. Public.
pub async fn list_courses(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let courses = CourseRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// GET /api/v1/courses/search?q=&category=&difficulty=&min_rating=
pub async fn search_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseSearch>,
) -> AppResult<impl IntoResponse> {
    let courses = CourseRepo::search(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// GET /api/v1/courses/{id}
///
/// Course with its outline. Signed-in, enrolled callers also get per-syllabus
/// lock flags.
pub async fn get_course(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail =
        courses::course_detail(&state.pool, course_id, viewer.map(|v| v.user_id)).await?;
    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/courses
pub async fn create_course(
    RequireAuthor(author): RequireAuthor,
    State(state): State<AppState>,
    Json(input): Json<CreateCourse>,
) -> AppResult<impl IntoResponse> {
    let course = courses::create_course(&state.pool, author.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// PUT /api/v1/courses/{id}
pub async fn update_course(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<impl IntoResponse> {
    let course = courses::update_course(&state.pool, &auth.actor(), course_id, &input).await?;
    Ok(Json(DataResponse { data: course }))
}

/// DELETE /api/v1/courses/{id}
pub async fn delete_course(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    courses::delete_course(&state.pool, &auth.actor(), course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/courses/{id}/activate
pub async fn activate_course(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let course =
        courses::set_course_status(&state.pool, &auth.actor(), course_id, CourseStatus::Active)
            .await?;
    Ok(Json(DataResponse { data: course }))
}

/// POST /api/v1/courses/{id}/deactivate
pub async fn deactivate_course(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let course =
        courses::set_course_status(&state.pool, &auth.actor(), course_id, CourseStatus::Inactive)
            .await?;
    Ok(Json(DataResponse { data: course }))
}

// ---------------------------------------------------------------------------
// Instructors
// ---------------------------------------------------------------------------

/// GET /api/v1/courses/{id}/instructors
pub async fn list_instructors(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    CourseContext::load(&state.pool, course_id).await?;
    let instructors = CourseInstructorRepo::list(&state.pool, course_id).await?;
    Ok(Json(DataResponse { data: instructors }))
}

/// POST /api/v1/courses/{id}/instructors
pub async fn add_instructors(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<AddInstructors>,
) -> AppResult<impl IntoResponse> {
    let instructors =
        courses::add_instructors(&state.pool, &auth.actor(), course_id, &input).await?;
    Ok(Json(DataResponse { data: instructors }))
}

// ---------------------------------------------------------------------------
// Enrollment and progress
// ---------------------------------------------------------------------------

/// POST /api/v1/courses/{id}/enroll
pub async fn enroll(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let receipt =
        enrollment::enroll(&state.pool, &state.event_bus, auth.user_id, course_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}

/// GET /api/v1/courses/{id}/progress
pub async fn my_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let progress = progress::course_progress(&state.pool, auth.user_id, course_id).await?;
    Ok(Json(DataResponse { data: progress }))
}

/// GET /api/v1/courses/{id}/students-progress
pub async fn students_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let students = progress::students_progress(&state.pool, &auth.actor(), course_id).await?;
    Ok(Json(DataResponse { data: students }))
}

// ---------------------------------------------------------------------------
// Outline
// ---------------------------------------------------------------------------

/// POST /api/v1/courses/{id}/syllabuses
///
/// Appends the syllabus after the current last one.
pub async fn create_syllabus(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<CreateSyllabus>,
) -> AppResult<impl IntoResponse> {
    let syllabus =
        content::create_syllabus(&state.pool, &auth.actor(), course_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: syllabus })))
}
