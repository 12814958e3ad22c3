//! Progress ledger rows and progress projections.

use coursehub_core::status::StatusId;
use coursehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub syllabus_id: DbId,
    pub status_id: StatusId,
    pub last_accessed_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user's completion percentage for one course.
#[derive(Debug, Clone, Serialize)]
pub struct CourseProgress {
    pub course_id: DbId,
    pub completed_syllabuses: i64,
    pub total_syllabuses: i64,
    pub percent_complete: i32,
}

/// Raw per-student counts for the instructor progress view.
#[derive(Debug, Clone, FromRow)]
pub struct StudentProgressRow {
    pub user_id: DbId,
    pub user_name: String,
    pub completed_syllabuses: i64,
    pub last_accessed_at: Option<Timestamp>,
}

/// One enrolled student's progress, as shown to course instructors.
#[derive(Debug, Clone, Serialize)]
pub struct StudentProgress {
    pub user_id: DbId,
    pub user_name: String,
    pub percent_complete: i32,
    pub last_accessed_at: Option<Timestamp>,
}
