//! Board participant roles.
//!
//! Discriminants must match the CHECK constraint on
//! `board_participants.role` in `20260301000002_create_boards.sql`.

use crate::error::CoreError;
use crate::types::ChoiceId;

define_choice_enum! {
    /// A participant's permission level on a single board.
    BoardRole {
        /// Created the board; the only role allowed to edit or delete it.
        Owner = 1 => "owner",
        /// May create and edit categories, goals, and comments.
        Writer = 2 => "writer",
        /// Read-only access to everything on the board.
        Reader = 3 => "reader",
    }
}

impl BoardRole {
    /// Whether this role may change board content (categories, goals, comments).
    pub fn can_edit_content(self) -> bool {
        matches!(self, BoardRole::Owner | BoardRole::Writer)
    }

    /// Whether this role may rename, re-share, or delete the board itself.
    pub fn can_manage_board(self) -> bool {
        self == BoardRole::Owner
    }
}

/// Parse a role ID supplied in a participant list.
///
/// The owner role is reserved for the board's creator and cannot be granted.
pub fn parse_assignable_role(id: ChoiceId) -> Result<BoardRole, CoreError> {
    match BoardRole::from_id(id) {
        Some(BoardRole::Owner) => Err(CoreError::Validation(
            "The owner role cannot be assigned to participants".to_string(),
        )),
        Some(role) => Ok(role),
        None => Err(CoreError::Validation(format!(
            "Unknown participant role {id}. Must be one of: 2 (writer), 3 (reader)"
        ))),
    }
}
