//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//!
//! Board-level roles are not carried in the token; handlers resolve them per
//! request through `ParticipantRepo`.

pub mod auth;
