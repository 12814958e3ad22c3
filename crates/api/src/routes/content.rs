//! Route definitions for course content below the course level.
//!
//! ```text
//! /syllabuses/{id}                GET, PUT, DELETE
//! /syllabuses/{id}/access         POST  record progress
//! /syllabuses/{id}/materials      GET, POST
//! /syllabuses/{id}/assignments    POST
//!
//! /materials/{id}                 GET, PUT, DELETE
//!
//! /assignments/{id}               GET, PUT, DELETE
//! /assignments/{id}/open          GET, POST
//! /assignments/{id}/submissions   GET, POST
//!
//! /submissions/{id}               PUT, DELETE
//! /submissions/{id}/grade         PUT
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{assignments, materials, submissions, syllabuses};
use crate::state::AppState;

/// Mounted at `/syllabuses`.
pub fn syllabus_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(syllabuses::get_syllabus)
                .put(syllabuses::update_syllabus)
                .delete(syllabuses::delete_syllabus),
        )
        .route("/{id}/access", post(syllabuses::record_access))
        .route(
            "/{id}/materials",
            get(syllabuses::list_materials).post(syllabuses::create_material),
        )
        .route("/{id}/assignments", post(syllabuses::create_assignment))
}

/// Mounted at `/materials`.
pub fn material_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(materials::get_material)
            .put(materials::update_material)
            .delete(materials::delete_material),
    )
}

/// Mounted at `/assignments`.
pub fn assignment_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(assignments::get_assignment)
                .put(assignments::update_assignment)
                .delete(assignments::delete_assignment),
        )
        .route(
            "/{id}/open",
            get(assignments::get_open_record).post(assignments::open_assignment),
        )
        .route(
            "/{id}/submissions",
            get(assignments::list_submissions).post(assignments::submit),
        )
}

/// Mounted at `/submissions`.
pub fn submission_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            put(submissions::revise_submission).delete(submissions::delete_submission),
        )
        .route("/{id}/grade", put(submissions::grade_submission))
}
