//! Handlers for the caller's own profile (`/profile`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use goalboard_core::error::CoreError;
use goalboard_core::validation::{validate_email, validate_new_password, validate_username};
use goalboard_db::models::user::{UpdateProfile, UserProfile};
use goalboard_db::repositories::{SessionRepo, UserRepo};
use serde::Deserialize;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /profile/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub new_password_repeat: String,
}

/// GET /api/v1/profile
pub async fn get(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<Json<UserProfile>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", auth_user.user_id))?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/profile
///
/// Update username, email, or names. Taking another user's username is a 409.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<UserProfile>> {
    if let Some(username) = &input.username {
        validate_username(username)?;
        if let Some(existing) = UserRepo::find_by_username(&state.pool, username).await? {
            if existing.id != auth_user.user_id {
                return Err(AppError::Core(CoreError::Conflict(format!(
                    "Username '{username}' is already taken"
                ))));
            }
        }
    }
    if let Some(email) = &input.email {
        validate_email(email)?;
    }

    let user = UserRepo::update_profile(&state.pool, auth_user.user_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("User", auth_user.user_id))?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/profile/password
///
/// Change the caller's password and revoke every refresh session, forcing
/// other devices to log in again. Returns 204 No Content.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", auth_user.user_id))?;

    let old_valid = verify_password(&input.old_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !old_valid {
        return Err(AppError::validation("Current password is incorrect"));
    }

    validate_new_password(&input.new_password, &input.new_password_repeat)?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::set_password_hash(&state.pool, user.id, &password_hash).await?;

    let revoked = SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, revoked, "Password changed");

    Ok(StatusCode::NO_CONTENT)
}
