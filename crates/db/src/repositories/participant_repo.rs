//! Repository for the `board_participants` table.
//!
//! The `role_*` lookups are the single source of truth for "what may this
//! user do here": they return `None` when the user cannot see the resource
//! at all, which handlers surface as 404.

use goalboard_core::roles::BoardRole;
use goalboard_core::types::{ChoiceId, DbId};
use sqlx::PgPool;

use crate::models::board::Participant;

/// Provides participant queries and role resolution.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// Resolve the user's role on a live (not deleted) board.
    pub async fn role_on_board(
        pool: &PgPool,
        board_id: DbId,
        user_id: DbId,
    ) -> Result<Option<BoardRole>, sqlx::Error> {
        let role = sqlx::query_scalar::<_, ChoiceId>(
            "SELECT bp.role
             FROM board_participants bp
             JOIN boards b ON b.id = bp.board_id
             WHERE bp.board_id = $1 AND bp.user_id = $2 AND b.is_deleted = false",
        )
        .bind(board_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(role.and_then(BoardRole::from_id))
    }

    /// Resolve the user's role on the board owning a live category.
    pub async fn role_for_category(
        pool: &PgPool,
        category_id: DbId,
        user_id: DbId,
    ) -> Result<Option<BoardRole>, sqlx::Error> {
        let role = sqlx::query_scalar::<_, ChoiceId>(
            "SELECT bp.role
             FROM goal_categories c
             JOIN board_participants bp ON bp.board_id = c.board_id
             WHERE c.id = $1 AND bp.user_id = $2 AND c.is_deleted = false",
        )
        .bind(category_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(role.and_then(BoardRole::from_id))
    }

    /// Resolve the user's role on the board owning a goal.
    pub async fn role_for_goal(
        pool: &PgPool,
        goal_id: DbId,
        user_id: DbId,
    ) -> Result<Option<BoardRole>, sqlx::Error> {
        let role = sqlx::query_scalar::<_, ChoiceId>(
            "SELECT bp.role
             FROM goals g
             JOIN goal_categories c ON c.id = g.category_id
             JOIN board_participants bp ON bp.board_id = c.board_id
             WHERE g.id = $1 AND bp.user_id = $2",
        )
        .bind(goal_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(role.and_then(BoardRole::from_id))
    }

    /// List a board's participants with usernames, owner first.
    pub async fn list_for_board(
        pool: &PgPool,
        board_id: DbId,
    ) -> Result<Vec<Participant>, sqlx::Error> {
        sqlx::query_as::<_, Participant>(
            "SELECT bp.id, bp.board_id, bp.user_id, u.username, bp.role,
                    bp.created_at, bp.updated_at
             FROM board_participants bp
             JOIN users u ON u.id = bp.user_id
             WHERE bp.board_id = $1
             ORDER BY bp.role ASC, u.username ASC",
        )
        .bind(board_id)
        .fetch_all(pool)
        .await
    }
}
