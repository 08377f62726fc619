//! Route definitions for the `/boards` resource.
//!
//! Boards are soft-deleted with a cascade to categories and goals.

use axum::routing::get;
use axum::Router;

use crate::handlers::board;
use crate::state::AppState;

/// Routes mounted at `/boards`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(board::list).post(board::create))
        .route(
            "/{id}",
            get(board::get_by_id)
                .put(board::update)
                .delete(board::delete),
        )
}
