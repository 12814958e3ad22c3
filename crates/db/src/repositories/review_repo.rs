//! Repository for the `course_reviews` table.

use coursehub_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::review::{CourseReview, CourseReviewWithAuthor, CreateCourseReview};

const COLUMNS: &str = "id, course_id, user_id, feedback_text, rate, created_at";

pub struct ReviewRepo;

impl ReviewRepo {
    pub async fn exists<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM course_reviews WHERE user_id = $1 AND course_id = $2)",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    pub async fn create(
        conn: &mut PgConnection,
        course_id: DbId,
        user_id: DbId,
        input: &CreateCourseReview,
    ) -> Result<CourseReview, sqlx::Error> {
        let query = format!(
            "INSERT INTO course_reviews (course_id, user_id, feedback_text, rate)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseReview>(&query)
            .bind(course_id)
            .bind(user_id)
            .bind(&input.feedback_text)
            .bind(input.rate)
            .fetch_one(conn)
            .await
    }

    /// `(sum of rates, number of reviews)` for a course.
    pub async fn rating_totals(
        conn: &mut PgConnection,
        course_id: DbId,
    ) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as(
            "SELECT COALESCE(SUM(rate), 0)::BIGINT, COUNT(*)
             FROM course_reviews WHERE course_id = $1",
        )
        .bind(course_id)
        .fetch_one(conn)
        .await
    }

    /// Reviews of a course, newest first, with reviewer name and role.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseReviewWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CourseReviewWithAuthor>(
            "SELECT cr.id, cr.course_id, cr.feedback_text, cr.rate,
                    u.name AS user_name, r.name AS user_role, cr.created_at
             FROM course_reviews cr
             JOIN users u ON u.id = cr.user_id
             JOIN roles r ON r.id = u.role_id
             WHERE cr.course_id = $1
             ORDER BY cr.created_at DESC, cr.id DESC",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }
}
