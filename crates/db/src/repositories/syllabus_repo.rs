//! Repository for the `syllabuses` table.
//!
//! Inserts and deletes go through [`OrderedCollection<SyllabusRepo>`] so the
//! per-course `sort_order` stays dense.

use std::future::Future;

use coursehub_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::syllabus::{CreateSyllabus, Syllabus, UpdateSyllabus};
use crate::ordered::{OrderedCollection, OrderedTable};

const COLUMNS: &str = "id, course_id, sort_order, title, description, created_at, updated_at";

pub struct SyllabusRepo;

/// Ordered syllabuses under a course.
pub type Syllabuses = OrderedCollection<SyllabusRepo>;

impl OrderedTable for SyllabusRepo {
    const TABLE: &'static str = "syllabuses";
    const PARENT_TABLE: &'static str = "courses";
    const PARENT_COLUMN: &'static str = "course_id";

    type Row = Syllabus;
    type Input = CreateSyllabus;

    fn insert<'c>(
        conn: &'c mut PgConnection,
        parent_id: DbId,
        input: &'c CreateSyllabus,
        sort_order: i32,
    ) -> impl Future<Output = Result<Syllabus, sqlx::Error>> + Send + 'c {
        async move {
            let query = format!(
                "INSERT INTO syllabuses (course_id, sort_order, title, description)
                 VALUES ($1, $2, $3, $4)
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, Syllabus>(&query)
                .bind(parent_id)
                .bind(sort_order)
                .bind(&input.title)
                .bind(&input.description)
                .fetch_one(conn)
                .await
        }
    }
}

impl SyllabusRepo {
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Syllabus>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM syllabuses WHERE id = $1");
        sqlx::query_as::<_, Syllabus>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// All syllabuses of a course in ascending `sort_order`.
    pub async fn list_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<Vec<Syllabus>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM syllabuses WHERE course_id = $1 ORDER BY sort_order"
        );
        sqlx::query_as::<_, Syllabus>(&query)
            .bind(course_id)
            .fetch_all(executor)
            .await
    }

    pub async fn count_by_course<'e>(
        executor: impl PgExecutor<'e>,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM syllabuses WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    /// Edit title and description. Position is never changed here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSyllabus,
    ) -> Result<Option<Syllabus>, sqlx::Error> {
        let query = format!(
            "UPDATE syllabuses SET
                title = COALESCE($2, title),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Syllabus>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }
}
