//! Goal model, DTOs, and list filter.

use goalboard_core::listing::{OrderTerm, Page};
use goalboard_core::types::{ChoiceId, Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::nullable;

/// A goal row from the `goals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Goal {
    pub id: DbId,
    pub category_id: DbId,
    /// The user who created the goal.
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// See [`goalboard_core::goal::GoalStatus`].
    pub status: ChoiceId,
    /// See [`goalboard_core::goal::GoalPriority`].
    pub priority: ChoiceId,
    pub due_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a goal. Status and priority default when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGoal {
    pub category_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<ChoiceId>,
    pub priority: Option<ChoiceId>,
    pub due_date: Option<Date>,
}

/// DTO for updating a goal. All fields are optional.
///
/// Moving a goal to another category is allowed as long as the target
/// category lives on the same board. `description` and `due_date` are
/// cleared by sending an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGoal {
    pub category_id: Option<DbId>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub status: Option<ChoiceId>,
    pub priority: Option<ChoiceId>,
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: Option<Option<Date>>,
}

/// Result of [`GoalRepo::update`](crate::repositories::GoalRepo::update).
#[derive(Debug)]
pub enum GoalUpdate {
    Updated(Goal),
    /// No goal with the given id.
    NotFound,
    /// The goal sits in a deleted category and stays archived.
    CategoryDeleted,
    /// The requested target category is gone or deleted.
    TargetUnavailable(DbId),
}

/// Ordering fields clients may request, mapped to columns.
pub const ORDERING_FIELDS: &[(&str, &str)] = &[("priority", "priority"), ("due_date", "due_date")];

/// Default goal ordering: most relaxed priority first, then nearest due date.
pub const DEFAULT_ORDERING: &[OrderTerm] = &[OrderTerm::asc("priority"), OrderTerm::asc("due_date")];

/// Typed filter for goal listing. Empty vectors mean "no filter".
#[derive(Debug, Clone, Default)]
pub struct GoalFilter {
    pub category_ids: Vec<DbId>,
    pub statuses: Vec<ChoiceId>,
    pub priorities: Vec<ChoiceId>,
    pub due_date_gte: Option<Date>,
    pub due_date_lte: Option<Date>,
    /// Pre-built `ILIKE` pattern matched against title and description.
    pub search_pattern: Option<String>,
    pub ordering: Vec<OrderTerm>,
    pub page: Option<Page>,
}
