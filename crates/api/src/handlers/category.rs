//! Handlers for the `/categories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use goalboard_core::listing::{like_pattern, parse_ordering, resolve_page};
use goalboard_core::permissions::{authorize_content, Operation};
use goalboard_core::roles::BoardRole;
use goalboard_core::types::DbId;
use goalboard_core::validation::validate_title;
use goalboard_db::models::category::{
    CategoryFilter, CreateCategory, GoalCategory, UpdateCategory, DEFAULT_ORDERING,
    ORDERING_FIELDS,
};
use goalboard_db::repositories::{CategoryRepo, ParticipantRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::CategoryListParams;
use crate::response::ListResponse;
use crate::state::AppState;

const ENTITY: &str = "category";

/// POST /api/v1/categories
///
/// Owners and writers of the target board only. An unknown, invisible, or
/// deleted board is a validation error.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<GoalCategory>)> {
    let role = ParticipantRepo::role_on_board(&state.pool, input.board_id, auth_user.user_id)
        .await?
        .ok_or_else(|| unknown_board(input.board_id))?;
    authorize_content(ENTITY, role, Operation::Create)?;
    validate_title("Category", &input.title)?;

    let category = CategoryRepo::create(&state.pool, auth_user.user_id, &input)
        .await?
        .ok_or_else(|| unknown_board(input.board_id))?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/categories
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<CategoryListParams>,
) -> AppResult<Json<ListResponse<GoalCategory>>> {
    let filter = CategoryFilter {
        board_id: params.board,
        title_pattern: like_pattern(params.search.as_deref()),
        ordering: parse_ordering(params.ordering.as_deref(), ORDERING_FIELDS, DEFAULT_ORDERING)?,
        page: resolve_page(params.limit, params.offset),
    };

    let categories = CategoryRepo::list_visible(&state.pool, auth_user.user_id, &filter).await?;
    let count = match filter.page {
        Some(_) => Some(CategoryRepo::count_visible(&state.pool, auth_user.user_id, &filter).await?),
        None => None,
    };
    Ok(Json(ListResponse::build(categories, count)))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<GoalCategory>> {
    let category = CategoryRepo::find_visible(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Category", id))?;
    Ok(Json(category))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<GoalCategory>> {
    let role = require_role(&state, id, auth_user.user_id).await?;
    authorize_content(ENTITY, role, Operation::Modify)?;
    if let Some(title) = &input.title {
        validate_title("Category", title)?;
    }

    let category = CategoryRepo::update_title(&state.pool, id, input.title.as_deref())
        .await?
        .ok_or_else(|| AppError::not_found("Category", id))?;
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
///
/// Soft-deletes the category and archives its goals.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let role = require_role(&state, id, auth_user.user_id).await?;
    authorize_content(ENTITY, role, Operation::Modify)?;

    CategoryRepo::soft_delete_cascade(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Category", id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// The caller's role on the board owning a live category, or 404.
async fn require_role(state: &AppState, category_id: DbId, user_id: DbId) -> AppResult<BoardRole> {
    ParticipantRepo::role_for_category(&state.pool, category_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Category", category_id))
}

fn unknown_board(board_id: DbId) -> AppError {
    AppError::validation(format!(
        "Board {board_id} does not exist, is deleted, or you are not a participant"
    ))
}
