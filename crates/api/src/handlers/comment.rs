//! Handlers for the `/comments` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use goalboard_core::listing::resolve_page;
use goalboard_core::permissions::{authorize_comment, Operation};
use goalboard_core::types::DbId;
use goalboard_core::validation::validate_comment_text;
use goalboard_db::models::comment::{CommentFilter, CreateComment, GoalComment, UpdateComment};
use goalboard_db::repositories::{CommentRepo, ParticipantRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::CommentListParams;
use crate::response::ListResponse;
use crate::state::AppState;

/// POST /api/v1/comments
///
/// Owners and writers of the goal's board only.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<GoalComment>)> {
    let role = ParticipantRepo::role_for_goal(&state.pool, input.goal_id, auth_user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::validation(format!(
                "Goal {} does not exist or you are not a participant",
                input.goal_id
            ))
        })?;
    authorize_comment(role, false, Operation::Create)?;
    validate_comment_text(&input.text)?;

    let comment = CommentRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/v1/comments
///
/// Newest first.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<CommentListParams>,
) -> AppResult<Json<ListResponse<GoalComment>>> {
    let filter = CommentFilter {
        goal_id: params.goal,
        page: resolve_page(params.limit, params.offset),
    };

    let comments = CommentRepo::list_visible(&state.pool, auth_user.user_id, &filter).await?;
    let count = match filter.page {
        Some(_) => Some(CommentRepo::count_visible(&state.pool, auth_user.user_id, &filter).await?),
        None => None,
    };
    Ok(Json(ListResponse::build(comments, count)))
}

/// GET /api/v1/comments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<GoalComment>> {
    let comment = find_visible(&state, id, auth_user.user_id).await?;
    Ok(Json(comment))
}

/// PUT /api/v1/comments/{id}
///
/// Author only.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComment>,
) -> AppResult<Json<GoalComment>> {
    let comment = find_visible(&state, id, auth_user.user_id).await?;
    authorize_author(&state, &comment, auth_user.user_id).await?;
    validate_comment_text(&input.text)?;

    let comment = CommentRepo::update_text(&state.pool, id, &input.text)
        .await?
        .ok_or_else(|| AppError::not_found("Comment", id))?;
    Ok(Json(comment))
}

/// DELETE /api/v1/comments/{id}
///
/// Author only. Comments are removed outright.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = find_visible(&state, id, auth_user.user_id).await?;
    authorize_author(&state, &comment, auth_user.user_id).await?;

    if CommentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Comment", id))
    }
}

async fn find_visible(state: &AppState, id: DbId, user_id: DbId) -> AppResult<GoalComment> {
    CommentRepo::find_visible(&state.pool, id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Comment", id))
}

async fn authorize_author(state: &AppState, comment: &GoalComment, user_id: DbId) -> AppResult<()> {
    let role = ParticipantRepo::role_for_goal(&state.pool, comment.goal_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Comment", comment.id))?;
    authorize_comment(role, comment.user_id == user_id, Operation::Modify)?;
    Ok(())
}
