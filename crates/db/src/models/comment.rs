//! Goal comment model, DTOs, and list filter.

use goalboard_core::listing::Page;
use goalboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A comment row from the `goal_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GoalComment {
    pub id: DbId,
    pub goal_id: DbId,
    /// The comment's author.
    pub user_id: DbId,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub goal_id: DbId,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComment {
    pub text: String,
}

/// Typed filter for comment listing. Results are always newest first.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub goal_id: Option<DbId>,
    pub page: Option<Page>,
}
