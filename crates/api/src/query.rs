//! Shared query parameter types for API handlers.
//!
//! Each list endpoint gets its own flat struct; `limit`/`offset` are repeated
//! rather than flattened because `serde_urlencoded` cannot parse numbers
//! through `#[serde(flatten)]`.

use chrono::NaiveDate;
use goalboard_core::types::DbId;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Pagination is opt-in: without `limit` the full list is returned. Values
/// are clamped via `goalboard_core::listing::resolve_page`.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /categories`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListParams {
    /// Restrict to one board.
    pub board: Option<DbId>,
    /// Case-insensitive substring match on the title.
    pub search: Option<String>,
    /// Comma-separated fields, `-` prefix for descending.
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /goals`.
///
/// `category`, `status`, and `priority` accept comma-separated id lists.
#[derive(Debug, Default, Deserialize)]
pub struct GoalListParams {
    pub category: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date_gte: Option<NaiveDate>,
    pub due_date_lte: Option<NaiveDate>,
    /// Case-insensitive substring match on title or description.
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /comments`.
#[derive(Debug, Default, Deserialize)]
pub struct CommentListParams {
    pub goal: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
