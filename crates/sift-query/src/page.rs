use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Error carried on a degraded page.
///
/// Keeps an HTTP-like severity code alongside the message so a handler can
/// both render the (empty) page and pick a response status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageError {
    pub code: u16,
    pub message: String,
}

impl PageError {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page error ({}): {}", self.code, self.message)
    }
}

impl std::error::Error for PageError {}

/// Result envelope shared by both execution engines.
///
/// `items` is always present (empty on an empty result). `total == -1` is
/// the sentinel for "count timed out, total unknown". A set `last_error`
/// marks the page as degraded; its shape stays well-formed regardless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData<T> {
    #[serde(
        rename = "error",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_error: Option<PageError>,
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl<T> PageData<T> {
    /// A well-formed page carrying an error instead of rows.
    pub fn degraded(page: i64, limit: i64, total: i64, error: PageError) -> Self {
        Self {
            last_error: Some(error),
            items: Vec::new(),
            total,
            page,
            limit,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.last_error.is_some()
    }
}
