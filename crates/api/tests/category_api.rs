//! HTTP-level integration tests for the `/categories` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_category_returns_201(pool: PgPool) {
    let (owner_id, owner) = common::create_user_with_token(&pool, "owner").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Board").await;

    let response = post_json_auth(
        app,
        "/api/v1/categories",
        &owner,
        serde_json::json!({ "board_id": board_id, "title": "Health" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Health");
    assert_eq!(json["board_id"], board_id);
    assert_eq!(json["user_id"], owner_id);
    assert_eq!(json["is_deleted"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reader_cannot_create_category(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let (reader_id, reader) = common::create_user_with_token(&pool, "reader").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Board").await;
    common::share_board(&app, &owner, board_id, serde_json::json!([{ "user_id": reader_id, "role": 3 }])).await;

    let response = post_json_auth(
        app,
        "/api/v1/categories",
        &reader,
        serde_json::json!({ "board_id": board_id, "title": "Nope" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_writer_can_create_category(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let (writer_id, writer) = common::create_user_with_token(&pool, "writer").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Board").await;
    common::share_board(&app, &owner, board_id, serde_json::json!([{ "user_id": writer_id, "role": 2 }])).await;

    common::create_category(&app, &writer, board_id, "Allowed").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_on_foreign_board_is_400(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let (_, stranger) = common::create_user_with_token(&pool, "stranger").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Board").await;

    let response = post_json_auth(
        app,
        "/api/v1/categories",
        &stranger,
        serde_json::json!({ "board_id": board_id, "title": "Sneaky" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_on_deleted_board_is_400(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Gone").await;
    let response = delete_auth(app.clone(), &format!("/api/v1/boards/{board_id}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json_auth(
        app,
        "/api/v1/categories",
        &owner,
        serde_json::json!({ "board_id": board_id, "title": "Too late" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_search_and_ordering(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let app = common::build_test_app(pool);
    let first = common::create_board(&app, &owner, "First").await;
    let second = common::create_board(&app, &owner, "Second").await;
    common::create_category(&app, &owner, first, "Work").await;
    common::create_category(&app, &owner, first, "Homework").await;
    common::create_category(&app, &owner, second, "Hobby").await;

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/categories?board={first}&ordering=-title"),
        &owner,
    )
    .await;
    let json = body_json(response).await;
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Work", "Homework"]);

    let response = get_auth(app, "/api/v1/categories?search=WORK", &owner).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_ordering_field_is_400(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/categories?ordering=board_id", &owner).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_category_title(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Board").await;
    let category_id = common::create_category(&app, &owner, board_id, "Old").await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/categories/{category_id}"),
        &owner,
        serde_json::json!({ "title": "New" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "New");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_category_archives_goals(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Board").await;
    let category_id = common::create_category(&app, &owner, board_id, "Doomed").await;
    let goal_id = common::create_goal(
        &app,
        &owner,
        serde_json::json!({ "category_id": category_id, "title": "Pending", "status": 2 }),
    )
    .await;

    let response =
        delete_auth(app.clone(), &format!("/api/v1/categories/{category_id}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), "/api/v1/categories", &owner).await;
    assert_eq!(body_json(response).await, serde_json::json!([]));

    let response = get_auth(app.clone(), &format!("/api/v1/goals/{goal_id}"), &owner).await;
    assert_eq!(body_json(response).await["status"], 4);

    // The board itself is untouched.
    let response = get_auth(app, &format!("/api/v1/boards/{board_id}"), &owner).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reader_cannot_delete_category(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let (reader_id, reader) = common::create_user_with_token(&pool, "reader").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Board").await;
    common::share_board(&app, &owner, board_id, serde_json::json!([{ "user_id": reader_id, "role": 3 }])).await;
    let category_id = common::create_category(&app, &owner, board_id, "Keep").await;

    let response = get_auth(app.clone(), &format!("/api/v1/categories/{category_id}"), &reader).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete_auth(app, &format!("/api/v1/categories/{category_id}"), &reader).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
