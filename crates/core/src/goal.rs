//! Goal status and priority choices.
//!
//! Discriminants must match the CHECK constraints on `goals.status` and
//! `goals.priority` in `20260301000004_create_goals.sql`.

use crate::error::CoreError;
use crate::types::ChoiceId;

define_choice_enum! {
    /// Lifecycle status of a goal. `Archived` doubles as the soft-deleted state.
    GoalStatus {
        ToDo = 1 => "to_do",
        InProgress = 2 => "in_progress",
        Done = 3 => "done",
        Archived = 4 => "archived",
    }
}

define_choice_enum! {
    /// Goal priority, ascending in urgency.
    GoalPriority {
        Low = 1 => "low",
        Medium = 2 => "medium",
        High = 3 => "high",
        Critical = 4 => "critical",
    }
}

/// Status assigned to new goals when the client omits one.
pub const DEFAULT_STATUS: GoalStatus = GoalStatus::ToDo;

/// Priority assigned to new goals when the client omits one.
pub const DEFAULT_PRIORITY: GoalPriority = GoalPriority::Medium;

/// Validate a client-supplied status ID.
pub fn validate_status(id: ChoiceId) -> Result<GoalStatus, CoreError> {
    GoalStatus::from_id(id).ok_or_else(|| {
        CoreError::Validation(format!("Unknown goal status {id}. Must be between 1 and 4"))
    })
}

/// Validate a client-supplied priority ID.
pub fn validate_priority(id: ChoiceId) -> Result<GoalPriority, CoreError> {
    GoalPriority::from_id(id).ok_or_else(|| {
        CoreError::Validation(format!(
            "Unknown goal priority {id}. Must be between 1 and 4"
        ))
    })
}
