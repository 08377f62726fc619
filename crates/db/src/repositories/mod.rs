//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods named `*_visible`
//! take the requesting user's id and only return rows on boards that user
//! participates in.

use goalboard_core::listing::Page;
use sqlx::{Postgres, QueryBuilder};

pub mod board_repo;
pub mod category_repo;
pub mod comment_repo;
pub mod goal_repo;
pub mod participant_repo;
pub mod session_repo;
pub mod user_repo;

pub use board_repo::BoardRepo;
pub use category_repo::CategoryRepo;
pub use comment_repo::CommentRepo;
pub use goal_repo::GoalRepo;
pub use participant_repo::ParticipantRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;

/// Append `LIMIT`/`OFFSET` when the caller asked for a page.
pub(crate) fn push_page(qb: &mut QueryBuilder<'_, Postgres>, page: Option<Page>) {
    if let Some(page) = page {
        qb.push(" LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);
    }
}
