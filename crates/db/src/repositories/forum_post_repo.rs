//! Repository for the `forum_posts` table.

use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::forum_post::{ForumPost, ForumPostWithAuthor};

const COLUMNS: &str = "id, course_id, user_id, content, created_at";

pub struct ForumPostRepo;

impl ForumPostRepo {
    pub async fn create(
        pool: &PgPool,
        course_id: DbId,
        user_id: DbId,
        content: &str,
    ) -> Result<ForumPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO forum_posts (course_id, user_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ForumPost>(&query)
            .bind(course_id)
            .bind(user_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Posts of a course, newest first, with poster name and role.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<ForumPostWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, ForumPostWithAuthor>(
            "SELECT fp.id, fp.course_id, fp.user_id, u.name AS user_name, r.name AS user_role,
                    fp.content, fp.created_at
             FROM forum_posts fp
             JOIN users u ON u.id = fp.user_id
             JOIN roles r ON r.id = u.role_id
             WHERE fp.course_id = $1
             ORDER BY fp.created_at DESC, fp.id DESC",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }
}
