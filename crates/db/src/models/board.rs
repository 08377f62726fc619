//! Board and board-participant models and DTOs.

use goalboard_core::types::{ChoiceId, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A board row from the `boards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Board {
    pub id: DbId,
    pub title: String,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A participant row joined with the participant's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Participant {
    pub id: DbId,
    pub board_id: DbId,
    pub user_id: DbId,
    pub username: String,
    /// See [`goalboard_core::roles::BoardRole`] for the value mapping.
    pub role: ChoiceId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Board detail payload: the board plus everyone who can see it.
#[derive(Debug, Clone, Serialize)]
pub struct BoardDetail {
    #[serde(flatten)]
    pub board: Board,
    pub participants: Vec<Participant>,
}

/// DTO for creating a new board. The creator becomes its owner.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBoard {
    pub title: String,
}

/// One entry of the participant list submitted when updating a board.
#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantInput {
    pub user_id: DbId,
    pub role: ChoiceId,
}

/// DTO for updating a board.
///
/// When `participants` is present it replaces every non-owner participant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBoard {
    pub title: Option<String>,
    pub participants: Option<Vec<ParticipantInput>>,
}

/// Row counts touched by a board soft-delete cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardDeletion {
    pub categories_deleted: u64,
    pub goals_archived: u64,
}
