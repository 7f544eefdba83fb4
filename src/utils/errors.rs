//! Error handling for SalaryBoard
//!
//! This module defines the main error type used throughout the application,
//! its mapping onto HTTP responses, and the severity model used by logging.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Postgres SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Main error type for SalaryBoard application
#[derive(Error, Debug)]
pub enum SalaryBoardError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Submission not found: {submission_id}")]
    SubmissionNotFound { submission_id: i64 },

    #[error("Technologies not found: {technology_ids:?}")]
    TechnologyNotFound { technology_ids: Vec<i64> },

    #[error("Technology already exists: {name}")]
    TechnologyExists { name: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded { retry_after_secs: u64 },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for SalaryBoard operations
pub type Result<T> = std::result::Result<T, SalaryBoardError>;

impl SalaryBoardError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SalaryBoardError::Database(_) => ErrorSeverity::Error,
            SalaryBoardError::Migration(_) => ErrorSeverity::Critical,
            SalaryBoardError::Config(_) => ErrorSeverity::Critical,
            SalaryBoardError::RateLimitExceeded { .. } => ErrorSeverity::Warning,
            SalaryBoardError::ServiceUnavailable(_) => ErrorSeverity::Warning,
            SalaryBoardError::InvalidInput(_) => ErrorSeverity::Info,
            SalaryBoardError::SubmissionNotFound { .. } => ErrorSeverity::Info,
            SalaryBoardError::TechnologyNotFound { .. } => ErrorSeverity::Info,
            SalaryBoardError::TechnologyExists { .. } => ErrorSeverity::Info,
        }
    }

    /// HTTP status the error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            SalaryBoardError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SalaryBoardError::SubmissionNotFound { .. } => StatusCode::NOT_FOUND,
            SalaryBoardError::TechnologyNotFound { .. } => StatusCode::NOT_FOUND,
            SalaryBoardError::TechnologyExists { .. } => StatusCode::CONFLICT,
            SalaryBoardError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            SalaryBoardError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "invalid_argument",
            StatusCode::NOT_FOUND => "not_found",
            StatusCode::CONFLICT => "already_exists",
            StatusCode::TOO_MANY_REQUESTS => "resource_exhausted",
            StatusCode::SERVICE_UNAVAILABLE => "unavailable",
            _ => "internal",
        }
    }

    /// Message safe to show to API clients.
    ///
    /// Server-side failures are reported generically; their detail only goes to the log.
    pub fn public_message(&self) -> String {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Whether a database error is a unique constraint violation
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        match err {
            sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
            _ => false,
        }
    }
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for SalaryBoardError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                tracing::error!(error = %self, severity = %self.severity(), "Request failed");
            }
            ErrorSeverity::Warning => {
                tracing::warn!(error = %self, "Request rejected");
            }
            ErrorSeverity::Info => {
                tracing::debug!(error = %self, "Request rejected");
            }
        }

        let body = ErrorBody {
            code: self.code(),
            message: self.public_message(),
        };
        let mut response = (status, Json(body)).into_response();

        if let SalaryBoardError::RateLimitExceeded { retry_after_secs } = self {
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
