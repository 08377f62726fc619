//! Domain types and pure business rules for the goal-tracking backend.
//!
//! Nothing in this crate touches the database or HTTP; repositories and
//! handlers call into it for role semantics, permission decisions, input
//! validation, and list-query parsing.

#[macro_use]
mod choice;

pub mod error;
pub mod goal;
pub mod listing;
pub mod permissions;
pub mod roles;
pub mod types;
pub mod validation;
