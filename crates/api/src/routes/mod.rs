pub mod auth;
pub mod content;
pub mod courses;
pub mod health;
pub mod me;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register, /auth/login        public
/// /me/...                            the caller's profile, courses, wallet
/// /courses/...                       catalog, lifecycle, enrollment, reviews, forum
/// /syllabuses/...                    outline entries, progress, materials
/// /materials/{id}
/// /assignments/...                   opening and submitting
/// /submissions/...                   revising and grading
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/me", me::router())
        .nest("/courses", courses::router())
        .nest("/syllabuses", content::syllabus_router())
        .nest("/materials", content::material_router())
        .nest("/assignments", content::assignment_router())
        .nest("/submissions", content::submission_router())
}
