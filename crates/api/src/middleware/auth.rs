//! Bearer-token extractor for goalboard handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use goalboard_core::error::CoreError;
use goalboard_core::types::DbId;
use goalboard_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The caller behind a valid access token whose account is still active.
///
/// Board roles are not part of the token; handlers resolve them through
/// `ParticipantRepo` for the board they touch.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        // Access tokens outlive deactivation, so the account is checked on
        // every request.
        match UserRepo::active_state(&state.pool, claims.sub).await? {
            None => return Err(unauthorized("User no longer exists")),
            Some(false) => {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Account is deactivated".into(),
                )))
            }
            Some(true) => {}
        }

        tracing::Span::current().record("user_id", claims.sub);
        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

/// The token of an `Authorization: Bearer <token>` header. The scheme is
/// matched case-insensitively.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    match header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>",
        )),
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}
