//! Submission entity model and DTOs.

use coursehub_core::status::StatusId;
use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: DbId,
    pub assignment_id: DbId,
    pub user_id: DbId,
    pub content_url: String,
    pub grade: Option<i32>,
    pub is_late: bool,
    pub status_id: StatusId,
    pub submitted_at: Timestamp,
    pub graded_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for creating or revising a submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionContent {
    pub content_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradeSubmission {
    pub grade: i32,
}
