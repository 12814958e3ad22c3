//! Repository for the `enrollments` table.

use coursehub_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::models::enrollment::Enrollment;

const COLUMNS: &str = "id, user_id, course_id, enrolled_at";

pub struct EnrollmentRepo;

impl EnrollmentRepo {
    pub async fn exists<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM enrollments WHERE user_id = $1 AND course_id = $2)",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    /// Insert an enrollment. Must run in the transaction that debits the balance.
    pub async fn create(
        conn: &mut PgConnection,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_one(conn)
            .await
    }
}
