//! Route definitions for `/courses`.
//!
//! ```text
//! GET    /                       list_courses
//! POST   /                       create_course (author role)
//! GET    /search                 search_courses
//! GET    /{id}                   get_course (optional auth)
//! PUT    /{id}                   update_course
//! DELETE /{id}                   delete_course
//! POST   /{id}/activate          activate_course
//! POST   /{id}/deactivate        deactivate_course
//! GET    /{id}/instructors       list_instructors
//! POST   /{id}/instructors       add_instructors
//! POST   /{id}/enroll            enroll
//! GET    /{id}/progress          my_progress
//! GET    /{id}/students-progress students_progress
//! POST   /{id}/syllabuses        create_syllabus
//! GET    /{id}/reviews           list_reviews
//! POST   /{id}/reviews           create_review
//! GET    /{id}/forum-posts       list_posts
//! POST   /{id}/forum-posts       create_post
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{courses, forum, reviews};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list_courses).post(courses::create_course))
        // Must come before `/{id}`.
        .route("/search", get(courses::search_courses))
        .route(
            "/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/{id}/activate", post(courses::activate_course))
        .route("/{id}/deactivate", post(courses::deactivate_course))
        .route(
            "/{id}/instructors",
            get(courses::list_instructors).post(courses::add_instructors),
        )
        .route("/{id}/enroll", post(courses::enroll))
        .route("/{id}/progress", get(courses::my_progress))
        .route("/{id}/students-progress", get(courses::students_progress))
        .route("/{id}/syllabuses", post(courses::create_syllabus))
        .route(
            "/{id}/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/{id}/forum-posts",
            get(forum::list_posts).post(forum::create_post),
        )
}
