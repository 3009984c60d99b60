use std::fmt;

use http::StatusCode;
use sift_query::ComparisonOp;

/// Failure surfaced by a relational adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The operation exceeded its deadline. On the count query this is not
    /// fatal: the driver substitutes `total = -1` and carries on.
    Timeout,
    /// The underlying driver or connection failed.
    Backend(String),
    /// The destination shape cannot receive the fetched rows.
    Unsupported(String),
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterError::Timeout => write!(f, "query timed out"),
            AdapterError::Backend(msg) => write!(f, "backend error: {msg}"),
            AdapterError::Unsupported(msg) => write!(f, "unsupported destination: {msg}"),
        }
    }
}

impl std::error::Error for AdapterError {}

impl AdapterError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdapterError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AdapterError::Backend(_) | AdapterError::Unsupported(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// The thin interface the page driver requires of a relational executor.
///
/// SQL text, placeholder dialects and row scanning all live behind this
/// trait. Conditions accumulate as conjuncts on the receiver;
/// [`QueryAdapter::search_like`] contributes a single OR group that is
/// ANDed against everything else. Row inclusion and ordering decisions must
/// match the in-memory engine for the same options and policy.
pub trait QueryAdapter<T> {
    /// `column = value`.
    fn where_eq(&mut self, column: &str, value: &str);

    /// `column IN (values…)`.
    fn where_in(&mut self, column: &str, values: &[String]);

    /// `column <op> value`.
    fn where_cmp(&mut self, column: &str, op: ComparisonOp, value: &str);

    /// Case-insensitive contains on one column, AND-combined.
    fn where_like(&mut self, column: &str, keyword: &str);

    /// Case-insensitive contains across `columns` with one shared keyword,
    /// OR-combined internally.
    fn search_like(&mut self, columns: &[String], keyword: &str);

    fn select(&mut self, columns: &[String]);

    fn group_by(&mut self, columns: &[String]);

    fn order_by(&mut self, column: &str, desc: bool);

    /// Count rows matching the accumulated conditions.
    fn count(&mut self) -> Result<i64, AdapterError>;

    /// Fetch the page rows. A non-positive `limit` means no limit.
    fn fetch(&mut self, offset: i64, limit: i64) -> Result<Vec<T>, AdapterError>;
}
