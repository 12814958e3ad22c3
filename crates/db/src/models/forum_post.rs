use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ForumPost {
    pub id: DbId,
    pub course_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateForumPost {
    pub content: String,
}

/// Forum post joined with the poster's name and role.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ForumPostWithAuthor {
    pub id: DbId,
    pub course_id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub user_role: String,
    pub content: String,
    pub created_at: Timestamp,
}
