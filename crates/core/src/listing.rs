//! List-endpoint query helpers: pagination, ordering, filtering, search.
//!
//! Handlers parse raw query-string values through these helpers and hand the
//! resulting typed values to the repositories, which only ever interpolate
//! whitelisted `&'static str` column names into SQL.

use std::str::FromStr;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Default page size when a client sends a non-positive `limit`.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum page size.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// A resolved limit/offset window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

/// Clamp a user-provided limit to `1..=max`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    match limit {
        Some(l) if l > 0 => l.min(max),
        _ => default.min(max),
    }
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Resolve limit/offset parameters into a [`Page`].
///
/// Pagination is opt-in: without a `limit` the caller gets every row and the
/// offset is ignored.
pub fn resolve_page(limit: Option<i64>, offset: Option<i64>) -> Option<Page> {
    limit.map(|l| Page {
        limit: clamp_limit(Some(l), DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        offset: clamp_offset(offset),
    })
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// One `ORDER BY` term with a whitelisted column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm {
    pub column: &'static str,
    pub descending: bool,
}

impl OrderTerm {
    pub const fn asc(column: &'static str) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self {
            column,
            descending: true,
        }
    }
}

/// Render terms as the body of an `ORDER BY` clause.
///
/// `id` is always appended as a final tiebreaker so paging is stable.
pub fn order_by_clause(terms: &[OrderTerm], table_alias: &str) -> String {
    let mut parts: Vec<String> = terms
        .iter()
        .map(|t| {
            let dir = if t.descending { "DESC" } else { "ASC" };
            format!("{table_alias}.{} {dir}", t.column)
        })
        .collect();
    parts.push(format!("{table_alias}.id ASC"));
    parts.join(", ")
}

/// Parse an `ordering` parameter such as `"-priority,due_date"`.
///
/// `allowed` maps public field names to column names. An absent or blank
/// parameter yields `default`; an unknown field is a validation error.
pub fn parse_ordering(
    raw: Option<&str>,
    allowed: &[(&str, &'static str)],
    default: &[OrderTerm],
) -> Result<Vec<OrderTerm>, CoreError> {
    let raw = match raw.map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => return Ok(default.to_vec()),
    };

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|field| {
            let (name, descending) = match field.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (field, false),
            };
            allowed
                .iter()
                .find(|(public, _)| *public == name)
                .map(|&(_, column)| OrderTerm { column, descending })
                .ok_or_else(|| {
                    let names: Vec<&str> = allowed.iter().map(|(p, _)| *p).collect();
                    CoreError::Validation(format!(
                        "Cannot order by '{name}'. Allowed fields: {}",
                        names.join(", ")
                    ))
                })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Filtering / search
// ---------------------------------------------------------------------------

/// Parse a comma-separated list filter such as `status=1,2`.
///
/// Absent or blank input yields an empty list (no filtering).
pub fn parse_id_list<T: FromStr>(raw: Option<&str>, param: &str) -> Result<Vec<T>, CoreError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<T>().map_err(|_| {
                CoreError::Validation(format!("Invalid value '{s}' for filter '{param}'"))
            })
        })
        .collect()
}

/// Build an `ILIKE` substring pattern from a search term.
///
/// Returns `None` for blank input. `%`, `_` and `\` are escaped so they
/// match literally.
pub fn like_pattern(term: Option<&str>) -> Option<String> {
    let term = term.map(str::trim).filter(|t| !t.is_empty())?;
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    Some(escaped)
}
