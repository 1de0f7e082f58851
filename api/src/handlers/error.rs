//! Mapping of domain errors onto HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use nk_core::errors::{DomainError, VerificationError};
use nk_shared::errors::IntoErrorResponse;
use nk_shared::{error_codes, ErrorResponse};

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Error returned by route handlers
///
/// Server-side failures are logged here and answered with a generic
/// message; their details never reach the client.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl IntoErrorResponse for ApiError {
    fn to_error_response(&self) -> ErrorResponse {
        match &self.0 {
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
            }
            DomainError::NotFound { resource } => ErrorResponse::new(
                error_codes::NOT_FOUND,
                format!("Resource not found: {}", resource),
            ),
            DomainError::Conflict { message } => {
                ErrorResponse::new(error_codes::CONFLICT, message.clone())
            }
            DomainError::Unauthorized => {
                ErrorResponse::new(error_codes::UNAUTHORIZED, "Authentication required")
            }
            DomainError::Storage { .. } => {
                ErrorResponse::new(error_codes::DATABASE_ERROR, INTERNAL_MESSAGE)
            }
            DomainError::Delivery { .. } => {
                ErrorResponse::new(error_codes::EMAIL_ERROR, "Email could not be sent")
            }
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, INTERNAL_MESSAGE)
            }
            DomainError::Verification(error) => match error {
                VerificationError::InvalidInput { .. } => {
                    ErrorResponse::new(error_codes::BAD_REQUEST, error.user_message())
                }
                VerificationError::StorageFailure { .. } => {
                    ErrorResponse::new(error_codes::DATABASE_ERROR, INTERNAL_MESSAGE)
                }
                _ => ErrorResponse::new(error_codes::VERIFICATION_FAILED, error.user_message()),
            },
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Conflict { .. } => StatusCode::CONFLICT,
            DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainError::Delivery { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DomainError::Storage { .. } | DomainError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            DomainError::Verification(VerificationError::StorageFailure { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            DomainError::Verification(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, status = status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self.0, status = status.as_u16(), "Request rejected");
        }
        HttpResponse::build(status).json(self.to_error_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_hide_details() {
        let error = ApiError(DomainError::storage("connection refused to 10.0.0.3"));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = error.to_error_response();
        assert_eq!(body.error, error_codes::DATABASE_ERROR);
        assert_eq!(body.message, INTERNAL_MESSAGE);
    }

    #[test]
    fn test_redemption_failures_share_one_message() {
        for failure in [
            VerificationError::NotFound,
            VerificationError::Expired,
            VerificationError::Mismatch,
        ] {
            let error = ApiError(failure.into());
            assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(
                error.to_error_response().message,
                "Invalid or expired verification code"
            );
        }
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let error: ApiError = DomainError::not_found("user kody").into();
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_error_response().error, error_codes::NOT_FOUND);
    }
}
