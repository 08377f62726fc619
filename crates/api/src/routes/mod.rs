pub mod auth;
pub mod board;
pub mod category;
pub mod comment;
pub mod goal;
pub mod health;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     signup (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
///
/// /profile                                         get, update own profile
/// /profile/password                                change password
///
/// /boards                                          list, create
/// /boards/{id}                                     get, update, delete (owner)
///
/// /categories                                      list, create
/// /categories/{id}                                 get, update, delete
///
/// /goals                                           list, create
/// /goals/{id}                                      get, update, archive
///
/// /comments                                        list, create
/// /comments/{id}                                   get, update, delete (author)
/// ```
///
/// Everything except signup, login, and refresh requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .nest("/boards", board::router())
        .nest("/categories", category::router())
        .nest("/goals", goal::router())
        .nest("/comments", comment::router())
}
