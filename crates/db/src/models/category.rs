//! Goal category model, DTOs, and list filter.

use goalboard_core::listing::{OrderTerm, Page};
use goalboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A category row from the `goal_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GoalCategory {
    pub id: DbId,
    pub board_id: DbId,
    /// The user who created the category.
    pub user_id: DbId,
    pub title: String,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category on a board.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub board_id: DbId,
    pub title: String,
}

/// DTO for updating a category. Only the title is mutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub title: Option<String>,
}

/// Ordering fields clients may request, mapped to columns.
pub const ORDERING_FIELDS: &[(&str, &str)] = &[("title", "title"), ("created", "created_at")];

/// Default category ordering.
pub const DEFAULT_ORDERING: &[OrderTerm] = &[OrderTerm::asc("title")];

/// Typed filter for category listing.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    pub board_id: Option<DbId>,
    /// Pre-built `ILIKE` pattern for the title.
    pub title_pattern: Option<String>,
    pub ordering: Vec<OrderTerm>,
    pub page: Option<Page>,
}
