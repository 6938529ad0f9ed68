//! Standardized API response envelope.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Machine-readable error code carried by every failed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    NotFound,
    RateLimitExceeded,
    DatabaseUnhealthy,
    FetchError,
    CreateError,
    UpvoteError,
    UpdateError,
    DeleteError,
    InternalError,
    /// A code this build does not know about.
    #[serde(other)]
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::DatabaseUnhealthy => "DATABASE_UNHEALTHY",
            ErrorCode::FetchError => "FETCH_ERROR",
            ErrorCode::CreateError => "CREATE_ERROR",
            ErrorCode::UpvoteError => "UPVOTE_ERROR",
            ErrorCode::UpdateError => "UPDATE_ERROR",
            ErrorCode::DeleteError => "DELETE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The envelope wrapped around every API response.
///
/// `data` is omitted when absent; a successful response carrying `()`
/// serializes it as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    /// Failed response with no payload.
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: Some(code),
            timestamp: Utc::now(),
        }
    }

    /// Attach a payload to a failed response (used by health checks).
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }
}
