//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Page handlers that cannot render anything useful
//! return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::ApiError;

/// Application-level error type for the web front end.
#[derive(Debug, Error)]
pub enum AppError {
    /// REST API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Api(ApiError::Status { status, .. }) if *status == StatusCode::NOT_FOUND => {
                StatusCode::NOT_FOUND
            }
            Self::Api(ApiError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Api(ApiError::Url(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Api(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Api(err) if status == StatusCode::NOT_FOUND => err.user_message(),
            Self::Api(ApiError::Url(_)) => "Internal server error".to_string(),
            Self::Api(_) => "External service error".to_string(),
            Self::BadRequest(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("Missing place ID".to_string());
        assert_eq!(err.to_string(), "Bad request: Missing place ID");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Api(ApiError::Url(url::ParseError::EmptyHost))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_status_mapping() {
        let missing = AppError::Api(ApiError::Status {
            status: StatusCode::NOT_FOUND,
            message: "Place not found".to_string(),
        });
        assert_eq!(get_status(missing), StatusCode::NOT_FOUND);

        let broken = AppError::Api(ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".to_string(),
        });
        assert_eq!(get_status(broken), StatusCode::BAD_GATEWAY);

        let forbidden = AppError::Api(ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            message: "Missing Authorization Header".to_string(),
        });
        assert_eq!(get_status(forbidden), StatusCode::BAD_GATEWAY);

        let empty = AppError::Api(ApiError::NotFound("Place not found: p1".to_string()));
        assert_eq!(get_status(empty), StatusCode::NOT_FOUND);
    }
}
