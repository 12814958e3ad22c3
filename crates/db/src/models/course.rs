//! Course entity model, DTOs and read projections.

use coursehub_core::status::StatusId;
use coursehub_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub description: String,
    pub price: Money,
    pub category: String,
    pub difficulty: String,
    pub image_url: Option<String>,
    pub status_id: StatusId,
    pub rating: i16,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a course. New courses always start as drafts.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    pub category: String,
    pub difficulty: String,
    pub image_url: Option<String>,
}

/// DTO for updating a course. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub image_url: Option<String>,
}

/// Catalog search filters (`?q=&category=&difficulty=&min_rating=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseSearch {
    pub q: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub min_rating: Option<i16>,
}

/// Co-instructor of a course, joined with the user's public fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseInstructor {
    pub user_id: DbId,
    pub name: String,
    pub email: String,
    pub added_at: Timestamp,
}

/// DTO for `POST /courses/{id}/instructors`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddInstructors {
    pub user_ids: Vec<DbId>,
}

/// One syllabus in a course outline.
///
/// `is_locked` is only present when the viewer is enrolled in the course.
#[derive(Debug, Clone, Serialize)]
pub struct SyllabusOutline {
    pub id: DbId,
    pub sort_order: i32,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
}

/// Course with its ordered outline, as shown on the course page.
#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub is_enrolled: bool,
    pub syllabuses: Vec<SyllabusOutline>,
}
