//! Route definitions for the caller's own profile.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET    /           -> get
/// PUT    /           -> update
/// PUT    /password   -> change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::get).put(profile::update))
        .route("/password", put(profile::change_password))
}
