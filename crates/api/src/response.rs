//! Shared response envelope types for list endpoints.
//!
//! Pagination is opt-in: a list request carrying `limit` gets a
//! `{ "count": n, "results": [...] }` envelope, anything else gets the bare
//! array. Use [`ListResponse::build`] so every list handler behaves the same.

use serde::Serialize;

/// A list payload, paginated or not.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ListResponse<T: Serialize> {
    /// Response for requests that supplied `limit`.
    Paginated {
        /// Total number of matching rows, ignoring limit/offset.
        count: i64,
        results: Vec<T>,
    },
    /// Response for unpaginated requests.
    Plain(Vec<T>),
}

impl<T: Serialize> ListResponse<T> {
    /// Wrap `results` in the envelope matching the request.
    ///
    /// `count` is `Some` exactly when the request was paginated.
    pub fn build(results: Vec<T>, count: Option<i64>) -> Self {
        match count {
            Some(count) => ListResponse::Paginated { count, results },
            None => ListResponse::Plain(results),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_list_serializes_as_array() {
        let json = serde_json::to_value(ListResponse::build(vec![1, 2], None)).unwrap();
        assert_eq!(json, serde_json::json!([1, 2]));
    }

    #[test]
    fn paginated_list_serializes_as_envelope() {
        let json = serde_json::to_value(ListResponse::build(vec!["a"], Some(7))).unwrap();
        assert_eq!(json, serde_json::json!({ "count": 7, "results": ["a"] }));
    }
}
