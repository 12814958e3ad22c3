//! Repository for the `course_instructors` join table.

use coursehub_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::course::CourseInstructor;

pub struct CourseInstructorRepo;

impl CourseInstructorRepo {
    /// Add instructors to a course, ignoring ones already present.
    ///
    /// Returns the number of newly added rows.
    pub async fn add_many(
        pool: &PgPool,
        course_id: DbId,
        user_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO course_instructors (course_id, user_id)
             SELECT $1, unnest($2::BIGINT[])
             ON CONFLICT ON CONSTRAINT uq_course_instructors DO NOTHING",
        )
        .bind(course_id)
        .bind(user_ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Instructors of a course with their public fields, in the order added.
    pub async fn list(pool: &PgPool, course_id: DbId) -> Result<Vec<CourseInstructor>, sqlx::Error> {
        sqlx::query_as::<_, CourseInstructor>(
            "SELECT u.id AS user_id, u.name, u.email, ci.created_at AS added_at
             FROM course_instructors ci
             JOIN users u ON u.id = ci.user_id
             WHERE ci.course_id = $1
             ORDER BY ci.created_at, ci.id",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    pub async fn instructor_ids<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> =
            sqlx::query_as("SELECT user_id FROM course_instructors WHERE course_id = $1")
                .bind(course_id)
                .fetch_all(executor)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Distinct email addresses of the primary author and all instructors.
    pub async fn recipient_emails(pool: &PgPool, course_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT u.email FROM courses c JOIN users u ON u.id = c.author_id WHERE c.id = $1
             UNION
             SELECT u.email FROM course_instructors ci JOIN users u ON u.id = ci.user_id
             WHERE ci.course_id = $1",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(email,)| email).collect())
    }
}
