//! Repository for the `syllabus_materials` table.

use std::future::Future;

use coursehub_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::syllabus_material::{
    CreateSyllabusMaterial, SyllabusMaterial, UpdateSyllabusMaterial,
};
use crate::ordered::{OrderedCollection, OrderedTable};

const COLUMNS: &str = "id, syllabus_id, sort_order, title, description, url, time_needed_mins, \
                       created_at, updated_at";

pub struct SyllabusMaterialRepo;

/// Ordered materials under a syllabus.
pub type SyllabusMaterials = OrderedCollection<SyllabusMaterialRepo>;

impl OrderedTable for SyllabusMaterialRepo {
    const TABLE: &'static str = "syllabus_materials";
    const PARENT_TABLE: &'static str = "syllabuses";
    const PARENT_COLUMN: &'static str = "syllabus_id";

    type Row = SyllabusMaterial;
    type Input = CreateSyllabusMaterial;

    fn insert<'c>(
        conn: &'c mut PgConnection,
        parent_id: DbId,
        input: &'c CreateSyllabusMaterial,
        sort_order: i32,
    ) -> impl Future<Output = Result<SyllabusMaterial, sqlx::Error>> + Send + 'c {
        async move {
            let query = format!(
                "INSERT INTO syllabus_materials
                    (syllabus_id, sort_order, title, description, url, time_needed_mins)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, SyllabusMaterial>(&query)
                .bind(parent_id)
                .bind(sort_order)
                .bind(&input.title)
                .bind(&input.description)
                .bind(&input.url)
                .bind(input.time_needed_mins)
                .fetch_one(conn)
                .await
        }
    }
}

impl SyllabusMaterialRepo {
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SyllabusMaterial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM syllabus_materials WHERE id = $1");
        sqlx::query_as::<_, SyllabusMaterial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Materials of a syllabus in ascending `sort_order`.
    pub async fn list_by_syllabus(
        pool: &PgPool,
        syllabus_id: DbId,
    ) -> Result<Vec<SyllabusMaterial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM syllabus_materials WHERE syllabus_id = $1 ORDER BY sort_order"
        );
        sqlx::query_as::<_, SyllabusMaterial>(&query)
            .bind(syllabus_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSyllabusMaterial,
    ) -> Result<Option<SyllabusMaterial>, sqlx::Error> {
        let query = format!(
            "UPDATE syllabus_materials SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                url = COALESCE($4, url),
                time_needed_mins = COALESCE($5, time_needed_mins)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SyllabusMaterial>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.url)
            .bind(input.time_needed_mins)
            .fetch_optional(pool)
            .await
    }
}
