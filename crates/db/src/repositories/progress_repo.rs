//! Repository for the `user_progress` ledger.

use coursehub_core::status::ProgressStatus;
use coursehub_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::progress::{StudentProgressRow, UserProgress};

const COLUMNS: &str = "id, user_id, course_id, syllabus_id, status_id, last_accessed_at, \
                       created_at, updated_at";

pub struct ProgressRepo;

impl ProgressRepo {
    pub async fn find<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        course_id: DbId,
        syllabus_id: DbId,
    ) -> Result<Option<UserProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_progress
             WHERE user_id = $1 AND course_id = $2 AND syllabus_id = $3"
        );
        sqlx::query_as::<_, UserProgress>(&query)
            .bind(user_id)
            .bind(course_id)
            .bind(syllabus_id)
            .fetch_optional(executor)
            .await
    }

    /// Ids of the course's syllabuses the user has completed.
    pub async fn completed_syllabus_ids<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT up.syllabus_id FROM user_progress up
             JOIN syllabuses s ON s.id = up.syllabus_id AND s.course_id = up.course_id
             WHERE up.user_id = $1 AND up.course_id = $2 AND up.status_id = $3",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(ProgressStatus::Completed.id())
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Write the ledger row for (user, course, syllabus) and touch
    /// `last_accessed_at`.
    ///
    /// A row that is already completed keeps its status even if a
    /// concurrent writer computed `in_progress`.
    pub async fn upsert(
        conn: &mut PgConnection,
        user_id: DbId,
        course_id: DbId,
        syllabus_id: DbId,
        status: ProgressStatus,
    ) -> Result<UserProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_progress (user_id, course_id, syllabus_id, status_id, last_accessed_at)
             VALUES ($1, $2, $3, $4, NOW())
             ON CONFLICT ON CONSTRAINT uq_user_progress DO UPDATE SET
                status_id = CASE
                    WHEN user_progress.status_id = $5 THEN user_progress.status_id
                    ELSE EXCLUDED.status_id
                END,
                last_accessed_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProgress>(&query)
            .bind(user_id)
            .bind(course_id)
            .bind(syllabus_id)
            .bind(status.id())
            .bind(ProgressStatus::Completed.id())
            .fetch_one(conn)
            .await
    }

    /// Completed-syllabus counts and last access for every enrolled student.
    pub async fn students_progress(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<StudentProgressRow>, sqlx::Error> {
        sqlx::query_as::<_, StudentProgressRow>(
            "SELECT u.id AS user_id, u.name AS user_name,
                    COUNT(s.id) AS completed_syllabuses,
                    MAX(up.last_accessed_at) AS last_accessed_at
             FROM enrollments e
             JOIN users u ON u.id = e.user_id
             LEFT JOIN user_progress up
                    ON up.user_id = e.user_id AND up.course_id = e.course_id
             LEFT JOIN syllabuses s
                    ON s.id = up.syllabus_id AND up.status_id = $2
             WHERE e.course_id = $1
             GROUP BY u.id, u.name, e.enrolled_at
             ORDER BY e.enrolled_at, u.id",
        )
        .bind(course_id)
        .bind(ProgressStatus::Completed.id())
        .fetch_all(pool)
        .await
    }
}
