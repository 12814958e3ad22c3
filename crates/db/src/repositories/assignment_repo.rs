//! Repository for the `assignments` table.

use coursehub_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::assignment::{Assignment, CreateAssignment, UpdateAssignment};

const COLUMNS: &str =
    "id, syllabus_id, title, description, max_duration_days, created_at, updated_at";

pub struct AssignmentRepo;

impl AssignmentRepo {
    pub async fn create(
        pool: &PgPool,
        syllabus_id: DbId,
        input: &CreateAssignment,
    ) -> Result<Assignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO assignments (syllabus_id, title, description, max_duration_days)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(syllabus_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.max_duration_days)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignments WHERE id = $1");
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn list_by_syllabus(
        pool: &PgPool,
        syllabus_id: DbId,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments WHERE syllabus_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(syllabus_id)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_syllabus<'e>(
        executor: impl PgExecutor<'e>,
        syllabus_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM assignments WHERE syllabus_id = $1")
                .bind(syllabus_id)
                .fetch_one(executor)
                .await?;
        Ok(count)
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAssignment,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!(
            "UPDATE assignments SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                max_duration_days = COALESCE($4, max_duration_days)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.max_duration_days)
            .fetch_optional(pool)
            .await
    }

    /// Delete an assignment. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
