//! Role-based authorization decisions for board-scoped resources.
//!
//! Visibility is enforced by the repositories: every lookup joins through
//! `board_participants` for the requesting user, so a resource on a board the
//! user does not participate in is simply never found (404). The functions
//! here decide what a participant with a known [`BoardRole`] may do with a
//! resource they *can* see (403 otherwise).

use crate::error::CoreError;
use crate::roles::BoardRole;

/// An operation a participant attempts on a board-scoped resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Retrieve or list.
    View,
    /// Create a child resource under a visible parent.
    Create,
    /// Update or delete an existing resource.
    Modify,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Create => "create",
            Operation::Modify => "modify",
        }
    }
}

/// Check access to a board itself.
///
/// Any participant may view; only the owner may modify (rename, change
/// participants, delete).
pub fn authorize_board(role: BoardRole, op: Operation) -> Result<(), CoreError> {
    match op {
        Operation::View => Ok(()),
        _ if role.can_manage_board() => Ok(()),
        _ => Err(forbidden("board", op, "Only the board owner")),
    }
}

/// Check access to a category or goal on a board.
///
/// Any participant may view; owners and writers may create and modify.
pub fn authorize_content(
    entity: &'static str,
    role: BoardRole,
    op: Operation,
) -> Result<(), CoreError> {
    match op {
        Operation::View => Ok(()),
        _ if role.can_edit_content() => Ok(()),
        _ => Err(forbidden(entity, op, "Only owners and writers")),
    }
}

/// Check access to a comment.
///
/// Any participant may view; owners and writers may post; only the author
/// may edit or delete, regardless of role.
pub fn authorize_comment(role: BoardRole, is_author: bool, op: Operation) -> Result<(), CoreError> {
    match op {
        Operation::View => Ok(()),
        Operation::Create if role.can_edit_content() => Ok(()),
        Operation::Create => Err(forbidden("comment", op, "Only owners and writers")),
        Operation::Modify if is_author => Ok(()),
        Operation::Modify => Err(forbidden("comment", op, "Only the comment author")),
    }
}

fn forbidden(entity: &str, op: Operation, who: &str) -> CoreError {
    CoreError::Forbidden(format!("{who} may {} this {entity}", op.verb()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const ALL_ROLES: [BoardRole; 3] = [BoardRole::Owner, BoardRole::Writer, BoardRole::Reader];

    #[test]
    fn every_participant_can_view_everything() {
        for role in ALL_ROLES {
            assert!(authorize_board(role, Operation::View).is_ok());
            assert!(authorize_content("goal", role, Operation::View).is_ok());
            assert!(authorize_comment(role, false, Operation::View).is_ok());
        }
    }

    #[test]
    fn only_owner_modifies_board() {
        assert!(authorize_board(BoardRole::Owner, Operation::Modify).is_ok());
        assert_matches!(
            authorize_board(BoardRole::Writer, Operation::Modify),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            authorize_board(BoardRole::Reader, Operation::Modify),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn reader_cannot_touch_content() {
        for op in [Operation::Create, Operation::Modify] {
            assert_matches!(
                authorize_content("category", BoardRole::Reader, op),
                Err(CoreError::Forbidden(_))
            );
            assert!(authorize_content("category", BoardRole::Writer, op).is_ok());
            assert!(authorize_content("category", BoardRole::Owner, op).is_ok());
        }
    }

    #[test]
    fn comment_modification_is_author_only() {
        // Even the board owner cannot edit someone else's comment.
        assert_matches!(
            authorize_comment(BoardRole::Owner, false, Operation::Modify),
            Err(CoreError::Forbidden(_))
        );
        // A reader who somehow authored a comment (e.g. demoted later) may still edit it.
        assert!(authorize_comment(BoardRole::Reader, true, Operation::Modify).is_ok());
    }

    #[test]
    fn readers_cannot_post_comments() {
        assert_matches!(
            authorize_comment(BoardRole::Reader, false, Operation::Create),
            Err(CoreError::Forbidden(_))
        );
        assert!(authorize_comment(BoardRole::Writer, false, Operation::Create).is_ok());
    }

    #[test]
    fn forbidden_message_names_entity() {
        let err = authorize_content("goal", BoardRole::Reader, Operation::Modify).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Forbidden: Only owners and writers may modify this goal"
        );
    }
}
