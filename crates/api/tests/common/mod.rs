#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use coursehub_api::auth::jwt::JwtConfig;
use coursehub_api::config::ServerConfig;
use coursehub_api::router::build_app_router;
use coursehub_api::state::AppState;
use coursehub_events::EventBus;

pub const PASSWORD: &str = "correct-horse-42";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        min_password_length: 8,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// The production router over `pool`, with an event bus nobody listens to.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&value).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the `data` field of a success envelope.
pub async fn expect_data(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register `email` with `role` and return `(user_id, access_token)`.
pub async fn signup(app: &Router, email: &str, role: &str) -> (i64, String) {
    let name = email.split('@').next().unwrap();
    let body = json!({ "name": name, "email": email, "password": PASSWORD, "role": role });
    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": email, "password": PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let user_id = json["data"]["user"]["id"].as_i64().unwrap();
    let token = json["data"]["access_token"].as_str().unwrap().to_string();
    (user_id, token)
}

pub async fn top_up(app: &Router, token: &str, amount: i64) {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/me/topups",
        json!({ "amount": amount, "payment_method": "bank_transfer" }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Create and activate a course; returns its id.
pub async fn active_course(app: &Router, author_token: &str, price: i64) -> i64 {
    let course = expect_data(
        post_json_auth(
            app.clone(),
            "/api/v1/courses",
            json!({
                "title": "Rust for Web",
                "description": "Axum and SQLx",
                "price": price,
                "category": "Web",
                "difficulty": "beginner"
            }),
            author_token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let course_id = course["id"].as_i64().unwrap();

    let response = post_auth(
        app.clone(),
        &format!("/api/v1/courses/{course_id}/activate"),
        author_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    course_id
}

/// Append a syllabus to the course; returns `(id, sort_order)`.
pub async fn add_syllabus(
    app: &Router,
    author_token: &str,
    course_id: i64,
    title: &str,
) -> (i64, i64) {
    let syllabus = expect_data(
        post_json_auth(
            app.clone(),
            &format!("/api/v1/courses/{course_id}/syllabuses"),
            json!({ "title": title }),
            author_token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    (
        syllabus["id"].as_i64().unwrap(),
        syllabus["sort_order"].as_i64().unwrap(),
    )
}

pub async fn add_assignment(app: &Router, author_token: &str, syllabus_id: i64) -> i64 {
    let assignment = expect_data(
        post_json_auth(
            app.clone(),
            &format!("/api/v1/syllabuses/{syllabus_id}/assignments"),
            json!({ "title": "Build a CRUD API", "max_duration_days": 7 }),
            author_token,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assignment["id"].as_i64().unwrap()
}
