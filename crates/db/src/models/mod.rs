//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - Where the entity has a list endpoint, a typed filter struct

pub mod board;
pub mod category;
pub mod comment;
pub mod goal;
pub mod session;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field of an update DTO.
///
/// Pair with `#[serde(default)]`: an absent field stays `None` (keep the
/// stored value) while an explicit `null` becomes `Some(None)` (clear it).
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
