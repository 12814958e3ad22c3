//! Assignment and opened-assignment models.

use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub syllabus_id: DbId,
    pub title: String,
    pub description: String,
    pub max_duration_days: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignment {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub max_duration_days: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssignment {
    pub title: Option<String>,
    pub description: Option<String>,
    pub max_duration_days: Option<i32>,
}

/// A student's opened assignment. `created_at` is the open time and
/// `due_at` the lateness boundary for submissions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserAssignment {
    pub id: DbId,
    pub assignment_id: DbId,
    pub user_id: DbId,
    pub due_at: Timestamp,
    pub created_at: Timestamp,
}
