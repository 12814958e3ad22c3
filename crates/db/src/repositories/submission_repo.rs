//! Repository for the `submissions` table.

use coursehub_core::status::{StatusId, SubmissionStatus};
use coursehub_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::submission::Submission;

const COLUMNS: &str = "id, assignment_id, user_id, content_url, grade, is_late, status_id, \
                       submitted_at, graded_at, created_at, updated_at";

pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a submission in `submitted` status.
    pub async fn create(
        conn: &mut PgConnection,
        assignment_id: DbId,
        user_id: DbId,
        content_url: &str,
        is_late: bool,
    ) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions (assignment_id, user_id, content_url, is_late, status_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(assignment_id)
            .bind(user_id)
            .bind(content_url)
            .bind(is_late)
            .bind(SubmissionStatus::Submitted.id())
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE id = $1");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_for_user<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        assignment_id: DbId,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM submissions WHERE user_id = $1 AND assignment_id = $2"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(user_id)
            .bind(assignment_id)
            .fetch_optional(executor)
            .await
    }

    pub async fn list_by_assignment(
        pool: &PgPool,
        assignment_id: DbId,
    ) -> Result<Vec<Submission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM submissions WHERE assignment_id = $1 ORDER BY submitted_at"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(assignment_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the content of a submission still in `expected` status,
    /// restamping its submission time and lateness.
    ///
    /// Returns `None` if the row is gone or its status changed concurrently.
    pub async fn revise(
        pool: &PgPool,
        id: DbId,
        content_url: &str,
        submitted_at: Timestamp,
        is_late: bool,
        expected: StatusId,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "UPDATE submissions SET content_url = $2, submitted_at = $3, is_late = $4
             WHERE id = $1 AND status_id = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .bind(content_url)
            .bind(submitted_at)
            .bind(is_late)
            .bind(expected)
            .fetch_optional(pool)
            .await
    }

    pub async fn grade(
        pool: &PgPool,
        id: DbId,
        grade: i32,
        status_id: StatusId,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "UPDATE submissions SET grade = $2, status_id = $3, graded_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .bind(grade)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a submission still in `expected` status. Returns `false` if the
    /// row is gone or was graded concurrently.
    pub async fn delete(pool: &PgPool, id: DbId, expected: StatusId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1 AND status_id = $2")
            .bind(id)
            .bind(expected)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
