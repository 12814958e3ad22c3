//! Repository for the `courses` table.
//!
//! Soft-deleted courses (`deleted_at IS NOT NULL`) are invisible to every
//! query here.

use coursehub_core::status::{CourseStatus, StatusId};
use coursehub_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::course::{Course, CourseSearch, CreateCourse, UpdateCourse};

const COLUMNS: &str = "id, author_id, title, description, price, category, difficulty, \
                       image_url, status_id, rating, deleted_at, created_at, updated_at";

/// Same columns qualified with the `c` alias for joins.
const C_COLUMNS: &str = "c.id, c.author_id, c.title, c.description, c.price, c.category, \
                         c.difficulty, c.image_url, c.status_id, c.rating, c.deleted_at, \
                         c.created_at, c.updated_at";

pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new draft course owned by `author_id`.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        input: &CreateCourse,
    ) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses
                (author_id, title, description, price, category, difficulty, image_url, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(author_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.category)
            .bind(&input.difficulty)
            .bind(&input.image_url)
            .bind(CourseStatus::Draft.id())
            .fetch_one(pool)
            .await
    }

    /// Find a non-deleted course by id, regardless of status.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// All active courses, newest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE status_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(CourseStatus::Active.id())
            .fetch_all(pool)
            .await
    }

    /// Active courses matching every supplied filter. `q` matches title or
    /// description case-insensitively.
    pub async fn search(pool: &PgPool, filter: &CourseSearch) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE status_id = $1 AND deleted_at IS NULL
               AND ($2::TEXT IS NULL
                    OR title ILIKE '%' || $2 || '%'
                    OR description ILIKE '%' || $2 || '%')
               AND ($3::TEXT IS NULL OR category = $3)
               AND ($4::TEXT IS NULL OR difficulty = $4)
               AND ($5::SMALLINT IS NULL OR rating >= $5)
             ORDER BY rating DESC, created_at DESC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(CourseStatus::Active.id())
            .bind(filter.q.as_deref().filter(|q| !q.trim().is_empty()))
            .bind(&filter.category)
            .bind(&filter.difficulty)
            .bind(filter.min_rating)
            .fetch_all(pool)
            .await
    }

    /// Courses the user authored or co-instructs, in any status.
    pub async fn list_for_instructor(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE deleted_at IS NULL
               AND (author_id = $1
                    OR id IN (SELECT course_id FROM course_instructors WHERE user_id = $1))
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Courses the user is enrolled in, most recent enrollment first.
    pub async fn list_enrolled(pool: &PgPool, user_id: DbId) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {C_COLUMNS} FROM courses c
             JOIN enrollments e ON e.course_id = c.id
             WHERE e.user_id = $1 AND c.deleted_at IS NULL
             ORDER BY e.enrolled_at DESC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a course. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                difficulty = COALESCE($6, difficulty),
                image_url = COALESCE($7, image_url)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.category)
            .bind(&input.difficulty)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status_id: StatusId,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET status_id = $2
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a course. Returns `true` if a row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE courses SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lock a non-deleted course row until the transaction ends. Returns
    /// `false` if the course does not exist.
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM courses WHERE id = $1 AND deleted_at IS NULL FOR NO KEY UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;
        Ok(row.is_some())
    }

    pub async fn set_rating(
        conn: &mut PgConnection,
        id: DbId,
        rating: i16,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE courses SET rating = $2 WHERE id = $1")
            .bind(id)
            .bind(rating)
            .execute(conn)
            .await?;
        Ok(())
    }
}
