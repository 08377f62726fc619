//! Handlers for the `/boards` resource.

use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use goalboard_core::listing::resolve_page;
use goalboard_core::permissions::{authorize_board, Operation};
use goalboard_core::roles::{parse_assignable_role, BoardRole};
use goalboard_core::types::DbId;
use goalboard_core::validation::validate_title;
use goalboard_db::models::board::{Board, BoardDetail, CreateBoard, ParticipantInput, UpdateBoard};
use goalboard_db::repositories::{BoardRepo, ParticipantRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::ListResponse;
use crate::state::AppState;

/// POST /api/v1/boards
///
/// The caller becomes the board's owner.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateBoard>,
) -> AppResult<(StatusCode, Json<BoardDetail>)> {
    validate_title("Board", &input.title)?;

    let board = BoardRepo::create_with_owner(&state.pool, &input.title, auth_user.user_id).await?;
    tracing::info!(board_id = board.id, owner_id = auth_user.user_id, "Board created");

    let detail = load_detail(&state, board).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/boards
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ListResponse<Board>>> {
    let page = resolve_page(params.limit, params.offset);
    let boards = BoardRepo::list_visible(&state.pool, auth_user.user_id, page).await?;
    let count = match page {
        Some(_) => Some(BoardRepo::count_visible(&state.pool, auth_user.user_id).await?),
        None => None,
    };
    Ok(Json(ListResponse::build(boards, count)))
}

/// GET /api/v1/boards/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<BoardDetail>> {
    let board = BoardRepo::find_visible(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Board", id))?;
    Ok(Json(load_detail(&state, board).await?))
}

/// PUT /api/v1/boards/{id}
///
/// Owner only. A `participants` list replaces every non-owner participant.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBoard>,
) -> AppResult<Json<BoardDetail>> {
    let role = require_role(&state, id, auth_user.user_id).await?;
    authorize_board(role, Operation::Modify)?;

    if let Some(title) = &input.title {
        validate_title("Board", title)?;
    }

    let participants = match &input.participants {
        Some(list) => Some(resolve_participants(&state, list).await?),
        None => None,
    };

    let board = BoardRepo::update(
        &state.pool,
        id,
        input.title.as_deref(),
        participants.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::not_found("Board", id))?;

    Ok(Json(load_detail(&state, board).await?))
}

/// DELETE /api/v1/boards/{id}
///
/// Owner only. Soft-deletes the board and cascades to its categories and goals.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let role = require_role(&state, id, auth_user.user_id).await?;
    authorize_board(role, Operation::Modify)?;

    BoardRepo::soft_delete_cascade(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Board", id))?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The caller's role on a live board, or 404 when they cannot see it.
async fn require_role(state: &AppState, board_id: DbId, user_id: DbId) -> AppResult<BoardRole> {
    ParticipantRepo::role_on_board(&state.pool, board_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Board", board_id))
}

async fn load_detail(state: &AppState, board: Board) -> AppResult<BoardDetail> {
    let participants = ParticipantRepo::list_for_board(&state.pool, board.id).await?;
    Ok(BoardDetail {
        board,
        participants,
    })
}

/// Validate a submitted participant list: assignable roles, no duplicate
/// users, and every user must exist and be active.
async fn resolve_participants(
    state: &AppState,
    list: &[ParticipantInput],
) -> AppResult<Vec<(DbId, BoardRole)>> {
    let mut seen = HashSet::with_capacity(list.len());
    let mut resolved = Vec::with_capacity(list.len());
    for entry in list {
        if !seen.insert(entry.user_id) {
            return Err(AppError::validation(format!(
                "User {} is listed more than once",
                entry.user_id
            )));
        }
        resolved.push((entry.user_id, parse_assignable_role(entry.role)?));
    }

    let ids: Vec<DbId> = resolved.iter().map(|(user_id, _)| *user_id).collect();
    let existing: HashSet<DbId> = UserRepo::existing_active_ids(&state.pool, &ids)
        .await?
        .into_iter()
        .collect();
    if let Some(missing) = ids.iter().find(|id| !existing.contains(id)) {
        return Err(AppError::validation(format!("User {missing} does not exist")));
    }

    Ok(resolved)
}
