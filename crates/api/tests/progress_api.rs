//! Sequential unlock, completion and the assignment lifecycle, end to end.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{
    body_json, delete_auth, expect_data, get, get_auth, post_auth, post_json_auth, put_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

const IN_PROGRESS: i64 = 1;
const COMPLETED: i64 = 2;

struct Course {
    id: i64,
    author: String,
    student_id: i64,
    student: String,
    /// Syllabus ids in outline order. The second carries `assignment`.
    syllabuses: [i64; 3],
    assignment: i64,
}

/// Free active course with three syllabuses and an enrolled student.
async fn enrolled_course(app: &Router) -> Course {
    let (_, author) = common::signup(app, "author@example.com", "author").await;
    let (student_id, student) = common::signup(app, "student@example.com", "student").await;
    let id = common::active_course(app, &author, 0).await;

    let (s1, _) = common::add_syllabus(app, &author, id, "Basics").await;
    let (s2, _) = common::add_syllabus(app, &author, id, "Routing").await;
    let (s3, order) = common::add_syllabus(app, &author, id, "Deploy").await;
    assert_eq!(order, 3);
    let assignment = common::add_assignment(app, &author, s2).await;

    let response = post_auth(app.clone(), &format!("/api/v1/courses/{id}/enroll"), &student).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    Course {
        id,
        author,
        student_id,
        student,
        syllabuses: [s1, s2, s3],
        assignment,
    }
}

async fn access(app: &Router, token: &str, syllabus_id: i64) -> axum::response::Response {
    post_auth(app.clone(), &format!("/api/v1/syllabuses/{syllabus_id}/access"), token).await
}

async fn percent(app: &Router, c: &Course) -> i64 {
    let progress = expect_data(
        get_auth(app.clone(), &format!("/api/v1/courses/{}/progress", c.id), &c.student).await,
        StatusCode::OK,
    )
    .await;
    progress["percent_complete"].as_i64().unwrap()
}

async fn submit(app: &Router, c: &Course) -> axum::response::Response {
    post_json_auth(
        app.clone(),
        &format!("/api/v1/assignments/{}/submissions", c.assignment),
        json!({ "content_url": "https://github.com/student/crud-api" }),
        &c.student,
    )
    .await
}

async fn open_assignment(app: &Router, c: &Course) {
    let response = post_auth(
        app.clone(),
        &format!("/api/v1/assignments/{}/open", c.assignment),
        &c.student,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Move the student's due date into the past.
async fn expire_due_date(pool: &PgPool, c: &Course) {
    sqlx::query(
        "UPDATE user_assignments SET due_at = NOW() - INTERVAL '1 day'
         WHERE user_id = $1 AND assignment_id = $2",
    )
    .bind(c.student_id)
    .bind(c.assignment)
    .execute(pool)
    .await
    .unwrap();
}

async fn progress_rows(pool: &PgPool, user_id: i64) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_progress WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

#[sqlx::test(migrations = "../db/migrations")]
async fn later_syllabus_is_refused_until_earlier_complete(pool: PgPool) {
    let app = common::build_test_app(pool);
    let c = enrolled_course(&app).await;

    let response = access(&app, &c.student, c.syllabuses[1]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_STATE");

    let row = expect_data(access(&app, &c.student, c.syllabuses[0]).await, StatusCode::OK).await;
    assert_eq!(row["status_id"], COMPLETED);

    // Syllabus 2 has an assignment, so access alone leaves it in progress.
    let row = expect_data(access(&app, &c.student, c.syllabuses[1]).await, StatusCode::OK).await;
    assert_eq!(row["status_id"], IN_PROGRESS);
    assert_eq!(percent(&app, &c).await, 33);

    let response = access(&app, &c.student, c.syllabuses[2]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn repeated_access_keeps_completion(pool: PgPool) {
    let app = common::build_test_app(pool);
    let c = enrolled_course(&app).await;

    for _ in 0..3 {
        let row =
            expect_data(access(&app, &c.student, c.syllabuses[0]).await, StatusCode::OK).await;
        assert_eq!(row["status_id"], COMPLETED);
    }
    assert_eq!(percent(&app, &c).await, 33);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn outline_locks_follow_progress(pool: PgPool) {
    let app = common::build_test_app(pool);
    let c = enrolled_course(&app).await;
    let uri = format!("/api/v1/courses/{}", c.id);

    let detail = expect_data(get_auth(app.clone(), &uri, &c.student).await, StatusCode::OK).await;
    assert_eq!(detail["is_enrolled"], true);
    let locks: Vec<bool> = detail["syllabuses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["is_locked"].as_bool().unwrap())
        .collect();
    assert_eq!(locks, vec![false, true, true]);

    access(&app, &c.student, c.syllabuses[0]).await;
    let detail = expect_data(get_auth(app, &uri, &c.student).await, StatusCode::OK).await;
    let locks: Vec<bool> = detail["syllabuses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["is_locked"].as_bool().unwrap())
        .collect();
    assert_eq!(locks, vec![false, false, true]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submitting_completes_the_syllabus_once(pool: PgPool) {
    let app = common::build_test_app(pool);
    let c = enrolled_course(&app).await;
    access(&app, &c.student, c.syllabuses[0]).await;
    access(&app, &c.student, c.syllabuses[1]).await;

    let response = submit(&app, &c).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_STATE");

    let open_uri = format!("/api/v1/assignments/{}/open", c.assignment);
    let first = expect_data(
        post_auth(app.clone(), &open_uri, &c.student).await,
        StatusCode::CREATED,
    )
    .await;
    let again =
        expect_data(post_auth(app.clone(), &open_uri, &c.student).await, StatusCode::OK).await;
    assert_eq!(first["due_at"], again["due_at"]);
    assert_eq!(again["created"], false);

    let submission = expect_data(submit(&app, &c).await, StatusCode::CREATED).await;
    assert_eq!(submission["is_late"], false);
    assert_eq!(percent(&app, &c).await, 66);

    assert_eq!(submit(&app, &c).await.status(), StatusCode::CONFLICT);

    // Grading is the instructor's business and leaves progress alone.
    let graded = expect_data(
        put_json_auth(
            app.clone(),
            &format!("/api/v1/submissions/{}/grade", submission["id"]),
            json!({ "grade": 90 }),
            &c.author,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(graded["grade"], 90);
    assert_eq!(percent(&app, &c).await, 66);

    let row = expect_data(access(&app, &c.student, c.syllabuses[2]).await, StatusCode::OK).await;
    assert_eq!(row["status_id"], COMPLETED);
    assert_eq!(percent(&app, &c).await, 100);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn students_grade_nothing(pool: PgPool) {
    let app = common::build_test_app(pool);
    let c = enrolled_course(&app).await;
    access(&app, &c.student, c.syllabuses[0]).await;
    post_auth(
        app.clone(),
        &format!("/api/v1/assignments/{}/open", c.assignment),
        &c.student,
    )
    .await;
    let submission = expect_data(submit(&app, &c).await, StatusCode::CREATED).await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/submissions/{}/grade", submission["id"]),
        json!({ "grade": 100 }),
        &c.student,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn review_requires_full_completion(pool: PgPool) {
    let app = common::build_test_app(pool);
    let c = enrolled_course(&app).await;
    let uri = format!("/api/v1/courses/{}/reviews", c.id);
    let review = json!({ "rate": 5, "feedback_text": "Clear and practical" });

    let response = post_json_auth(app.clone(), &uri, review.clone(), &c.student).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    access(&app, &c.student, c.syllabuses[0]).await;
    post_auth(
        app.clone(),
        &format!("/api/v1/assignments/{}/open", c.assignment),
        &c.student,
    )
    .await;
    assert_eq!(submit(&app, &c).await.status(), StatusCode::CREATED);
    access(&app, &c.student, c.syllabuses[2]).await;

    let response = post_json_auth(app.clone(), &uri, review.clone(), &c.student).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = post_json_auth(app.clone(), &uri, review, &c.student).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let course = expect_data(
        get_auth(app, &format!("/api/v1/courses/{}", c.id), &c.student).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(course["rating"], 5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refused_access_writes_nothing(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let c = enrolled_course(&app).await;

    let response = access(&app, &c.student, c.syllabuses[2]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(progress_rows(&pool, c.student_id).await, 0);

    access(&app, &c.student, c.syllabuses[0]).await;
    let before: (i64, String) = sqlx::query_as(
        "SELECT status_id::BIGINT, last_accessed_at::TEXT FROM user_progress WHERE user_id = $1",
    )
    .bind(c.student_id)
    .fetch_one(&pool)
    .await
    .unwrap();

    let response = access(&app, &c.student, c.syllabuses[2]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(progress_rows(&pool, c.student_id).await, 1);
    let after: (i64, String) = sqlx::query_as(
        "SELECT status_id::BIGINT, last_accessed_at::TEXT FROM user_progress WHERE user_id = $1",
    )
    .bind(c.student_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(before, after);
    assert_eq!(percent(&app, &c).await, 33);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn lock_flags_are_omitted_for_outsiders(pool: PgPool) {
    let app = common::build_test_app(pool);
    let c = enrolled_course(&app).await;
    let (_, outsider) = common::signup(&app, "outsider@example.com", "student").await;
    let uri = format!("/api/v1/courses/{}", c.id);

    let anonymous = expect_data(get(app.clone(), &uri).await, StatusCode::OK).await;
    let not_enrolled = expect_data(get_auth(app, &uri, &outsider).await, StatusCode::OK).await;

    for detail in [anonymous, not_enrolled] {
        assert_eq!(detail["is_enrolled"], false);
        let outline = detail["syllabuses"].as_array().unwrap();
        assert_eq!(outline.len(), 3);
        assert!(outline.iter().all(|s| s.get("is_locked").is_none()));
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submission_after_due_date_is_late(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let c = enrolled_course(&app).await;
    access(&app, &c.student, c.syllabuses[0]).await;
    open_assignment(&app, &c).await;
    expire_due_date(&pool, &c).await;

    let submission = expect_data(submit(&app, &c).await, StatusCode::CREATED).await;
    assert_eq!(submission["is_late"], true);
    // Late work still completes the syllabus.
    assert_eq!(percent(&app, &c).await, 66);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn revising_after_due_date_marks_late(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let c = enrolled_course(&app).await;
    access(&app, &c.student, c.syllabuses[0]).await;
    open_assignment(&app, &c).await;

    let submission = expect_data(submit(&app, &c).await, StatusCode::CREATED).await;
    assert_eq!(submission["is_late"], false);
    expire_due_date(&pool, &c).await;

    let revised = expect_data(
        put_json_auth(
            app,
            &format!("/api/v1/submissions/{}", submission["id"]),
            json!({ "content_url": "https://github.com/student/crud-api-v2" }),
            &c.student,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(revised["content_url"], "https://github.com/student/crud-api-v2");
    assert_eq!(revised["is_late"], true);
    assert_ne!(revised["submitted_at"], submission["submitted_at"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn graded_submission_cannot_be_withdrawn(pool: PgPool) {
    let app = common::build_test_app(pool);
    let c = enrolled_course(&app).await;
    access(&app, &c.student, c.syllabuses[0]).await;
    open_assignment(&app, &c).await;
    let submission = expect_data(submit(&app, &c).await, StatusCode::CREATED).await;
    let uri = format!("/api/v1/submissions/{}", submission["id"]);

    let response = put_json_auth(
        app.clone(),
        &format!("{uri}/grade"),
        json!({ "grade": 75 }),
        &c.author,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete_auth(app.clone(), &uri, &c.student).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_STATE");

    let list = expect_data(
        get_auth(
            app,
            &format!("/api/v1/assignments/{}/submissions", c.assignment),
            &c.author,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(list[0]["grade"], 75);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ungraded_submission_can_be_withdrawn(pool: PgPool) {
    let app = common::build_test_app(pool);
    let c = enrolled_course(&app).await;
    access(&app, &c.student, c.syllabuses[0]).await;
    open_assignment(&app, &c).await;
    let submission = expect_data(submit(&app, &c).await, StatusCode::CREATED).await;

    let uri = format!("/api/v1/submissions/{}", submission["id"]);
    let response = delete_auth(app.clone(), &uri, &c.author).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = delete_auth(app, &uri, &c.student).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn instructors_see_each_students_progress(pool: PgPool) {
    let app = common::build_test_app(pool);
    let c = enrolled_course(&app).await;
    access(&app, &c.student, c.syllabuses[0]).await;
    let uri = format!("/api/v1/courses/{}/students-progress", c.id);

    let rows = expect_data(get_auth(app.clone(), &uri, &c.author).await, StatusCode::OK).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], c.student_id);
    assert_eq!(rows[0]["user_name"], "student");
    assert_eq!(rows[0]["percent_complete"], 33);
    assert!(rows[0]["last_accessed_at"].is_string());

    let response = get_auth(app, &uri, &c.student).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn students_of_an_empty_course_are_at_zero(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, author) = common::signup(&app, "author@example.com", "author").await;
    let (_, student) = common::signup(&app, "student@example.com", "student").await;
    let course_id = common::active_course(&app, &author, 0).await;
    let response =
        post_auth(app.clone(), &format!("/api/v1/courses/{course_id}/enroll"), &student).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let rows = expect_data(
        get_auth(
            app.clone(),
            &format!("/api/v1/courses/{course_id}/students-progress"),
            &author,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(rows[0]["percent_complete"], 0);

    // The student's own percentage is undefined without syllabuses.
    let response = get_auth(app, &format!("/api/v1/courses/{course_id}/progress"), &student).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
