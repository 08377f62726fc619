//! HTTP-level integration tests for the `/boards` resource: ownership,
//! participant management, visibility, and the delete cascade.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use goalboard_db::repositories::UserRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_creator_becomes_owner(pool: PgPool) {
    let (owner_id, token) = common::create_user_with_token(&pool, "owner").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/boards",
        &token,
        serde_json::json!({ "title": "Sprint" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Sprint");
    assert_eq!(json["is_deleted"], false);
    let participants = json["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0]["user_id"], owner_id);
    assert_eq!(participants[0]["role"], 1);
    assert_eq!(participants[0]["username"], "owner");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_title_is_400(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "owner").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/boards",
        &token,
        serde_json::json!({ "title": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_participant_cannot_see_board(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let (_, stranger) = common::create_user_with_token(&pool, "stranger").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Private").await;

    let response = get_auth(app.clone(), &format!("/api/v1/boards/{board_id}"), &stranger).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, "/api/v1/boards", &stranger).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_share_board_with_participants(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let (writer_id, writer) = common::create_user_with_token(&pool, "writer").await;
    let (reader_id, _) = common::create_user_with_token(&pool, "reader").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Shared").await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/boards/{board_id}"),
        &owner,
        serde_json::json!({
            "title": "Shared board",
            "participants": [
                { "user_id": writer_id, "role": 2 },
                { "user_id": reader_id, "role": 3 },
            ],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Shared board");
    assert_eq!(json["participants"].as_array().unwrap().len(), 3);

    // The writer now sees the board.
    let response = get_auth(app, "/api/v1/boards", &writer).await;
    let boards = body_json(response).await;
    assert_eq!(boards.as_array().unwrap().len(), 1);
    assert_eq!(boards[0]["id"], board_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_participant_list_replaces_previous_one(pool: PgPool) {
    let (owner_id, owner) = common::create_user_with_token(&pool, "owner").await;
    let (first_id, first) = common::create_user_with_token(&pool, "first").await;
    let (second_id, _) = common::create_user_with_token(&pool, "second").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Rotating").await;

    common::share_board(&app, &owner, board_id, serde_json::json!([{ "user_id": first_id, "role": 2 }])).await;
    common::share_board(&app, &owner, board_id, serde_json::json!([{ "user_id": second_id, "role": 3 }])).await;

    let response = get_auth(app.clone(), &format!("/api/v1/boards/{board_id}"), &owner).await;
    let json = body_json(response).await;
    let ids: Vec<i64> = json["participants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["user_id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&owner_id), "owner row is never removed");
    assert!(ids.contains(&second_id));
    assert!(!ids.contains(&first_id), "dropped participant must be removed");

    let response = get_auth(app, &format!("/api/v1/boards/{board_id}"), &first).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_role_cannot_be_assigned(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let (other_id, _) = common::create_user_with_token(&pool, "other").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Mine").await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/boards/{board_id}"),
        &owner,
        serde_json::json!({ "participants": [{ "user_id": other_id, "role": 1 }] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_participant_is_400(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Mine").await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/boards/{board_id}"),
        &owner,
        serde_json::json!({ "participants": [{ "user_id": 999_999, "role": 2 }] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivated_participant_is_400(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let retired_id = common::create_user(&pool, "retired").await;
    UserRepo::deactivate(&pool, retired_id).await.unwrap();
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Mine").await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/boards/{board_id}"),
        &owner,
        serde_json::json!({ "participants": [{ "user_id": retired_id, "role": 3 }] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_writer_cannot_update_or_delete_board(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let (writer_id, writer) = common::create_user_with_token(&pool, "writer").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Guarded").await;
    common::share_board(&app, &owner, board_id, serde_json::json!([{ "user_id": writer_id, "role": 2 }])).await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/boards/{board_id}"),
        &writer,
        serde_json::json!({ "title": "Hijacked" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app, &format!("/api/v1/boards/{board_id}"), &writer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_board_cascades(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let app = common::build_test_app(pool);
    let board_id = common::create_board(&app, &owner, "Doomed").await;
    let category_id = common::create_category(&app, &owner, board_id, "Work").await;
    let goal_id = common::create_goal(
        &app,
        &owner,
        serde_json::json!({ "category_id": category_id, "title": "Ship it" }),
    )
    .await;

    let response = delete_auth(app.clone(), &format!("/api/v1/boards/{board_id}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), &format!("/api/v1/boards/{board_id}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response =
        get_auth(app.clone(), &format!("/api/v1/categories/{category_id}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, &format!("/api/v1/goals/{goal_id}"), &owner).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_board_list_pagination_envelope(pool: PgPool) {
    let (_, owner) = common::create_user_with_token(&pool, "owner").await;
    let app = common::build_test_app(pool);
    for title in ["A", "B", "C"] {
        common::create_board(&app, &owner, title).await;
    }

    let response = get_auth(app, "/api/v1/boards?limit=2&offset=1", &owner).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 3);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["title"], "B");
    assert_eq!(results[1]["title"], "C");
}
