use sqlx::PgPool;

/// Every status lookup table is seeded with the names the domain enums expect.
#[sqlx::test(migrations = "./migrations")]
async fn lookup_tables_match_status_enums(pool: PgPool) {
    use coursehub_core::status::{CourseStatus, ProgressStatus, SubmissionStatus, TopupStatus};

    let expected: Vec<(&str, Vec<(i16, &str)>)> = vec![
        (
            "course_statuses",
            [CourseStatus::Draft, CourseStatus::Active, CourseStatus::Inactive]
                .iter()
                .map(|s| (s.id(), s.as_str()))
                .collect(),
        ),
        (
            "progress_statuses",
            [ProgressStatus::InProgress, ProgressStatus::Completed]
                .iter()
                .map(|s| (s.id(), s.as_str()))
                .collect(),
        ),
        (
            "submission_statuses",
            [SubmissionStatus::Submitted, SubmissionStatus::Graded]
                .iter()
                .map(|s| (s.id(), s.as_str()))
                .collect(),
        ),
        (
            "topup_statuses",
            [TopupStatus::Pending, TopupStatus::Completed]
                .iter()
                .map(|s| (s.id(), s.as_str()))
                .collect(),
        ),
    ];

    for (table, rows) in expected {
        let actual: Vec<(i16, String)> =
            sqlx::query_as(&format!("SELECT id, name FROM {table} ORDER BY id"))
                .fetch_all(&pool)
                .await
                .unwrap();
        let actual: Vec<(i16, &str)> = actual.iter().map(|(id, n)| (*id, n.as_str())).collect();
        assert_eq!(actual, rows, "seed mismatch in {table}");
    }
}

/// Roles are seeded with the ids used for registration.
#[sqlx::test(migrations = "./migrations")]
async fn roles_are_seeded(pool: PgPool) {
    use coursehub_core::roles::{ROLE_AUTHOR, ROLE_AUTHOR_ID, ROLE_STUDENT, ROLE_STUDENT_ID};

    let rows: Vec<(i16, String)> = sqlx::query_as("SELECT id, name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(
        rows,
        vec![
            (ROLE_STUDENT_ID, ROLE_STUDENT.to_string()),
            (ROLE_AUTHOR_ID, ROLE_AUTHOR.to_string()),
        ]
    );
}

/// Every table (except _sqlx_migrations) has created_at and updated_at as timestamptz.
#[sqlx::test(migrations = "./migrations")]
async fn all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name::TEXT
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert!(!tables.is_empty());

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let result: Option<(String,)> = sqlx::query_as(
                "SELECT data_type::TEXT
                 FROM information_schema.columns
                 WHERE table_schema = 'public' AND table_name = $1 AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz"
            );
        }
    }
}

/// Health check succeeds against a migrated database.
#[sqlx::test(migrations = "./migrations")]
async fn health_check_passes(pool: PgPool) {
    coursehub_db::health_check(&pool).await.unwrap();
}
