//! Registration, login and bearer-token enforcement.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, PASSWORD};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn register_then_login(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, token) = common::signup(&app, "ada@example.com", "student").await;

    let json = body_json(get_auth(app, "/api/v1/me", &token).await).await;
    assert_eq!(json["data"]["id"], user_id);
    assert_eq!(json["data"]["role"], "student");
    assert_eq!(json["data"]["balance"], 0);
    assert!(json["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    common::signup(&app, "dup@example.com", "student").await;

    let body = json!({
        "name": "dup",
        "email": "dup@example.com",
        "password": PASSWORD,
        "role": "author"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn short_password_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "name": "x",
        "email": "x@example.com",
        "password": "short",
        "role": "student"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    common::signup(&app, "bob@example.com", "student").await;

    let body = json!({ "email": "bob@example.com", "password": "not-the-password" });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json!({ "email": "nobody@example.com", "password": "not-the-password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn protected_routes_need_a_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    assert_eq!(get(app.clone(), "/api/v1/me").await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        get_auth(app, "/api/v1/me", "garbage").await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn students_cannot_create_courses(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = common::signup(&app, "stu@example.com", "student").await;

    let body = json!({
        "title": "Nope",
        "price": 0,
        "category": "Web",
        "difficulty": "beginner"
    });
    let response = post_json_auth(app, "/api/v1/courses", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
