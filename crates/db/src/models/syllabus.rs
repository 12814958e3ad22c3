//! Syllabus entity model and DTOs.

use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::assignment::Assignment;
use crate::models::syllabus_material::SyllabusMaterial;

/// A row from the `syllabuses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Syllabus {
    pub id: DbId,
    pub course_id: DbId,
    pub sort_order: i32,
    pub title: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for appending a syllabus to a course. The position is assigned on insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSyllabus {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// DTO for editing a syllabus. Position is not editable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSyllabus {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Syllabus with its ordered materials and its assignments.
#[derive(Debug, Clone, Serialize)]
pub struct SyllabusDetail {
    #[serde(flatten)]
    pub syllabus: Syllabus,
    pub materials: Vec<SyllabusMaterial>,
    pub assignments: Vec<Assignment>,
}
