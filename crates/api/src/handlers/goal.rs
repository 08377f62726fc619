//! Handlers for the `/goals` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use goalboard_core::goal::{validate_priority, validate_status, DEFAULT_PRIORITY, DEFAULT_STATUS};
use goalboard_core::listing::{like_pattern, parse_id_list, parse_ordering, resolve_page};
use goalboard_core::permissions::{authorize_content, Operation};
use goalboard_core::roles::BoardRole;
use goalboard_core::types::DbId;
use goalboard_core::validation::validate_title;
use goalboard_db::models::goal::{
    CreateGoal, Goal, GoalFilter, GoalUpdate, UpdateGoal, DEFAULT_ORDERING, ORDERING_FIELDS,
};
use goalboard_db::repositories::{CategoryRepo, GoalRepo, ParticipantRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::GoalListParams;
use crate::response::ListResponse;
use crate::state::AppState;

const ENTITY: &str = "goal";

/// POST /api/v1/goals
///
/// Owners and writers only. Status defaults to "to do", priority to "medium".
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateGoal>,
) -> AppResult<(StatusCode, Json<Goal>)> {
    let role = ParticipantRepo::role_for_category(&state.pool, input.category_id, auth_user.user_id)
        .await?
        .ok_or_else(|| unknown_category(input.category_id))?;
    authorize_content(ENTITY, role, Operation::Create)?;
    validate_title("Goal", &input.title)?;

    let status = input.status.map(validate_status).transpose()?.unwrap_or(DEFAULT_STATUS);
    let priority = input
        .priority
        .map(validate_priority)
        .transpose()?
        .unwrap_or(DEFAULT_PRIORITY);

    let goal = GoalRepo::create(&state.pool, auth_user.user_id, &input, status, priority)
        .await?
        .ok_or_else(|| unknown_category(input.category_id))?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// GET /api/v1/goals
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<GoalListParams>,
) -> AppResult<Json<ListResponse<Goal>>> {
    let filter = GoalFilter {
        category_ids: parse_id_list(params.category.as_deref(), "category")?,
        statuses: parse_id_list(params.status.as_deref(), "status")?,
        priorities: parse_id_list(params.priority.as_deref(), "priority")?,
        due_date_gte: params.due_date_gte,
        due_date_lte: params.due_date_lte,
        search_pattern: like_pattern(params.search.as_deref()),
        ordering: parse_ordering(params.ordering.as_deref(), ORDERING_FIELDS, DEFAULT_ORDERING)?,
        page: resolve_page(params.limit, params.offset),
    };

    let goals = GoalRepo::list_visible(&state.pool, auth_user.user_id, &filter).await?;
    let count = match filter.page {
        Some(_) => Some(GoalRepo::count_visible(&state.pool, auth_user.user_id, &filter).await?),
        None => None,
    };
    Ok(Json(ListResponse::build(goals, count)))
}

/// GET /api/v1/goals/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Goal>> {
    let goal = GoalRepo::find_visible(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Goal", id))?;
    Ok(Json(goal))
}

/// PUT /api/v1/goals/{id}
///
/// A goal may move to another live category on the same board. Goals in a
/// deleted category are read-only (400).
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGoal>,
) -> AppResult<Json<Goal>> {
    let role = require_role(&state, id, auth_user.user_id).await?;
    authorize_content(ENTITY, role, Operation::Modify)?;

    if let Some(title) = &input.title {
        validate_title("Goal", title)?;
    }
    if let Some(status) = input.status {
        validate_status(status)?;
    }
    if let Some(priority) = input.priority {
        validate_priority(priority)?;
    }
    if let Some(target_id) = input.category_id {
        check_category_move(&state, id, target_id, auth_user.user_id).await?;
    }

    match GoalRepo::update(&state.pool, id, &input).await? {
        GoalUpdate::Updated(goal) => Ok(Json(goal)),
        GoalUpdate::NotFound => Err(AppError::not_found("Goal", id)),
        GoalUpdate::CategoryDeleted => Err(AppError::validation(format!(
            "Goal {id} belongs to a deleted category and can no longer be changed"
        ))),
        // Goals are never removed, so the target category was deleted after
        // the move was checked.
        GoalUpdate::TargetUnavailable(target_id) => Err(unknown_category(target_id)),
    }
}

/// DELETE /api/v1/goals/{id}
///
/// Archives the goal; goals are never removed.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let role = require_role(&state, id, auth_user.user_id).await?;
    authorize_content(ENTITY, role, Operation::Modify)?;

    if GoalRepo::archive(&state.pool, id).await? {
        tracing::debug!(goal_id = id, "Goal archived");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Goal", id))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The caller's role on the board owning a goal, or 404.
async fn require_role(state: &AppState, goal_id: DbId, user_id: DbId) -> AppResult<BoardRole> {
    ParticipantRepo::role_for_goal(&state.pool, goal_id, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Goal", goal_id))
}

/// Reject moving a goal into a category that is invisible, deleted, or on
/// another board.
async fn check_category_move(
    state: &AppState,
    goal_id: DbId,
    target_id: DbId,
    user_id: DbId,
) -> AppResult<()> {
    let goal = GoalRepo::find_by_id(&state.pool, goal_id)
        .await?
        .ok_or_else(|| AppError::not_found("Goal", goal_id))?;
    if goal.category_id == target_id {
        return Ok(());
    }

    let current = CategoryRepo::find_by_id_include_deleted(&state.pool, goal.category_id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Goal {goal_id} has no category")))?;
    let target = CategoryRepo::find_visible(&state.pool, target_id, user_id)
        .await?
        .ok_or_else(|| unknown_category(target_id))?;

    if target.board_id != current.board_id {
        return Err(AppError::validation(
            "A goal can only be moved to a category on the same board",
        ));
    }
    Ok(())
}

fn unknown_category(category_id: DbId) -> AppError {
    AppError::validation(format!(
        "Category {category_id} does not exist, is deleted, or you are not a participant"
    ))
}
