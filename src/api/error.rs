//! Errors reported by the backend.

use crate::models::{DateSuggestion, FieldError};
use serde_json::Value;
use std::fmt;

/// How a failed call should be surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401: the session is no longer valid.
    Unauthorized,
    /// 400 with per-field messages.
    Validation,
    /// 400 with alternative date ranges.
    Conflict,
    /// Authorization, business rule or server failure.
    Other,
}

/// A non-success HTTP response from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub field_errors: Vec<FieldError>,
    pub suggestions: Vec<DateSuggestion>,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            field_errors: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Build the error from a raw response body.
    ///
    /// JSON bodies contribute `message` (or `error`), `errors` and
    /// `suggestions`, either at top level or nested under `data`.
    /// Anything else degrades to the raw text.
    pub fn from_body(status: u16, reason: Option<&str>, body: &str) -> Self {
        let Ok(json) = serde_json::from_str::<Value>(body) else {
            let text = body.trim();
            let message = if text.is_empty() {
                "Network error".to_string()
            } else {
                text.to_string()
            };
            return Self::new(status, message);
        };

        let message = lookup(&json, "message")
            .or_else(|| lookup(&json, "error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| reason.map(str::to_string))
            .unwrap_or_else(|| format!("Request failed with status {status}"));

        let field_errors = lookup(&json, "errors")
            .and_then(|v| serde_json::from_value::<Vec<FieldError>>(v.clone()).ok())
            .unwrap_or_default();

        let suggestions = lookup(&json, "suggestions")
            .and_then(|v| serde_json::from_value::<Vec<DateSuggestion>>(v.clone()).ok())
            .unwrap_or_default();

        Self {
            status,
            message,
            field_errors,
            suggestions,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status {
            401 => ErrorKind::Unauthorized,
            400 if !self.field_errors.is_empty() => ErrorKind::Validation,
            400 if !self.suggestions.is_empty() => ErrorKind::Conflict,
            _ => ErrorKind::Other,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (HTTP {})", self.message, self.status)
    }
}

impl std::error::Error for ApiError {}

/// Top-level key first, then the same key under `data`.
fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    json.get(key)
        .filter(|v| !v.is_null())
        .or_else(|| json.get("data").and_then(|d| d.get(key)).filter(|v| !v.is_null()))
}
