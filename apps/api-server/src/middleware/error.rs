//! Error handling - every failure leaves the server as an envelope.

use std::time::Duration;

use actix_web::{
    HttpRequest, HttpResponse, ResponseError,
    error::{JsonPayloadError, PathError, QueryPayloadError},
    http::{StatusCode, header},
    web,
};
use idea_core::{DomainError, RepoError};
use idea_shared::{ApiResponse, ErrorCode};

/// Application-level error type that converts to envelope responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Rate limit exceeded, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    /// A store operation failed. The cause has already been logged.
    #[error("{message}")]
    Operation {
        code: ErrorCode,
        message: &'static str,
    },

    /// A fault raised outside the handlers, keeping the status it carried.
    #[error("{message}")]
    Unexpected { status: StatusCode, message: String },
}

impl AppError {
    /// Map a store failure for one operation.
    ///
    /// A missing row becomes a 404; anything else is logged with its cause
    /// and reported under `code` without the details.
    pub fn store(code: ErrorCode, message: &'static str, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Idea not found".to_string()),
            other => {
                tracing::error!(error = %other, code = %code, "{message}");
                AppError::Operation { code, message }
            }
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::RateLimited { .. } => ErrorCode::RateLimitExceeded,
            AppError::Operation { code, .. } => *code,
            AppError::Unexpected { status, .. } if status.is_client_error() => {
                ErrorCode::ValidationError
            }
            AppError::Unexpected { .. } => ErrorCode::InternalError,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::RateLimited { .. } => "Too many requests".to_string(),
            AppError::Operation { message, .. } => message.to_string(),
            AppError::Unexpected { status, message } if status.is_server_error() => {
                tracing::error!(status = status.as_u16(), "Unexpected error: {}", message);
                "Internal server error".to_string()
            }
            AppError::Unexpected { message, .. } => message.clone(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Operation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unexpected { status, .. } => *status,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = ApiResponse::<()>::failure(self.code(), self.message());
        let mut response = HttpResponse::build(self.status_code());

        if let AppError::RateLimited { retry_after } = self {
            let seconds = retry_after.as_secs_f64().ceil().max(1.0) as u64;
            response.insert_header((header::RETRY_AFTER, seconds.to_string()));
        }

        response.json(body)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let DomainError::Validation(msg) = err;
        AppError::Validation(msg)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Extractor settings that route body, query and path failures through
/// [`AppError`].
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let status = err.status_code();
        let message = err.to_string();
        let app_error = if status == StatusCode::BAD_REQUEST {
            AppError::Validation(message)
        } else {
            AppError::Unexpected { status, message }
        };
        app_error.into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        AppError::Validation(err.to_string()).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        AppError::Validation(err.to_string()).into()
    })
}
