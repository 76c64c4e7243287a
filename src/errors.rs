//! Unified application error type.
//! All modules (api, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::api::error::ApiError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Backend-related
    // ---------------------------
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),

    // ---------------------------
    // Session errors
    // ---------------------------
    #[error("Not logged in. Run `rtaskflow login` first")]
    NotAuthenticated,

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Action not permitted: {0}")]
    Forbidden(String),

    // ---------------------------
    // Parsing / input errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid tab: {0}")]
    InvalidTab(String),

    #[error("No vacation request with id {0}")]
    VacationNotFound(i64),

    #[error("No employee with id {0}")]
    EmployeeNotFound(i64),

    #[error("Invalid form: {0}")]
    InvalidForm(String),

    #[error("{0}")]
    PasswordPolicy(String),

    #[error("No suggestion #{0} available")]
    InvalidSuggestion(usize),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// The backend error carried by this error, if any.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            AppError::Api(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.api().is_some_and(ApiError::is_unauthorized)
    }
}

pub type AppResult<T> = Result<T, AppError>;
