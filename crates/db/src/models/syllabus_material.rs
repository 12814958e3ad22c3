//! Syllabus material entity model and DTOs.

use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `syllabus_materials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SyllabusMaterial {
    pub id: DbId,
    pub syllabus_id: DbId,
    pub sort_order: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub time_needed_mins: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for appending a material to a syllabus.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSyllabusMaterial {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub time_needed_mins: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSyllabusMaterial {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub time_needed_mins: Option<i32>,
}
