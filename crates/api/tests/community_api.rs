//! Forum posts, wallet history and catalog search.

mod common;

use axum::http::StatusCode;
use common::{expect_data, get, get_auth, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn forum_posts_are_listed_newest_first(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, author) = common::signup(&app, "author@example.com", "author").await;
    let (_, student) = common::signup(&app, "student@example.com", "student").await;
    let course_id = common::active_course(&app, &author, 0).await;
    let uri = format!("/api/v1/courses/{course_id}/forum-posts");

    let first = expect_data(
        post_json_auth(app.clone(), &uri, json!({ "content": "  Is chapter 2 out?  " }), &student)
            .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(first["content"], "Is chapter 2 out?");
    expect_data(
        post_json_auth(app.clone(), &uri, json!({ "content": "Yes, today." }), &author).await,
        StatusCode::CREATED,
    )
    .await;

    let posts = expect_data(get(app, &uri).await, StatusCode::OK).await;
    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["content"], "Yes, today.");
    assert_eq!(posts[0]["user_role"], "author");
    assert_eq!(posts[1]["user_name"], "student");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn forum_rejects_blank_posts_and_unknown_courses(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, author) = common::signup(&app, "author@example.com", "author").await;
    let course_id = common::active_course(&app, &author, 0).await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/courses/{course_id}/forum-posts"),
        json!({ "content": "   " }),
        &author,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/api/v1/courses/999999/forum-posts",
        json!({ "content": "hello" }),
        &author,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn topups_accumulate_and_are_listed(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, student) = common::signup(&app, "student@example.com", "student").await;
    common::top_up(&app, &student, 10_000).await;
    common::top_up(&app, &student, 25_000).await;

    let history = expect_data(
        get_auth(app.clone(), "/api/v1/me/topups", &student).await,
        StatusCode::OK,
    )
    .await;
    let amounts: Vec<i64> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["amount"].as_i64().unwrap())
        .collect();
    assert_eq!(amounts, vec![25_000, 10_000]);

    let me = expect_data(get_auth(app.clone(), "/api/v1/me", &student).await, StatusCode::OK).await;
    assert_eq!(me["balance"], 35_000);

    let response = post_json_auth(
        app,
        "/api/v1/me/topups",
        json!({ "amount": 0, "payment_method": "bank_transfer" }),
        &student,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_filters_active_courses(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, author) = common::signup(&app, "author@example.com", "author").await;
    let web = common::active_course(&app, &author, 0).await;

    let draft = expect_data(
        post_json_auth(
            app.clone(),
            "/api/v1/courses",
            json!({
                "title": "Rust on Android",
                "price": 0,
                "category": "Android",
                "difficulty": "advanced"
            }),
            &author,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    let ids = |list: serde_json::Value| -> Vec<i64> {
        list.as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect()
    };

    let found = expect_data(get(app.clone(), "/api/v1/courses/search?q=rust").await, StatusCode::OK)
        .await;
    assert_eq!(ids(found), vec![web]);

    let found = expect_data(
        get(app.clone(), "/api/v1/courses/search?category=Web&difficulty=beginner").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(ids(found), vec![web]);

    let found = expect_data(
        get(app.clone(), "/api/v1/courses/search?category=Android").await,
        StatusCode::OK,
    )
    .await;
    assert!(ids(found).is_empty(), "draft {} must stay hidden", draft["id"]);

    let found =
        expect_data(get(app, "/api/v1/courses/search?min_rating=1").await, StatusCode::OK).await;
    assert!(ids(found).is_empty());
}
