//! Course review model and DTOs.

use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseReview {
    pub id: DbId,
    pub course_id: DbId,
    pub user_id: DbId,
    pub feedback_text: String,
    pub rate: i16,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseReview {
    #[serde(default)]
    pub feedback_text: String,
    pub rate: i16,
}

/// Review joined with the reviewer's name and role.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseReviewWithAuthor {
    pub id: DbId,
    pub course_id: DbId,
    pub feedback_text: String,
    pub rate: i16,
    pub user_name: String,
    pub user_role: String,
    pub created_at: Timestamp,
}
