//! HTTP error mapping.
//!
//! Every context error funnels through `DomainError` and is rendered as
//! `{ "code", "message", "details" }` with a status derived from its
//! category.
//!
//! | Category | HTTP Status |
//! |----------|-------------|
//! | Validation | 400 |
//! | NotFound | 404 |
//! | Permission | 403 (401 for `UNAUTHORIZED`) |
//! | InvalidState | 409 |
//! | Persistence | 502 for collaborator failures, 500 otherwise |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::applicant::ApplicantError;
use crate::domain::assignment::AssignmentError;
use crate::domain::foundation::{
    AuthError, DomainError, ErrorCategory, ErrorCode, ValidationError,
};
use crate::domain::messaging::MessagingError;
use crate::ports::RewriteError;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn bad_request(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(DomainError::validation(field, message))
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.0.code)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::PaymentFailed | ErrorCode::RewriteFailed | ErrorCode::NotificationFailed => {
            StatusCode::BAD_GATEWAY
        }
        other => match other.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Permission => StatusCode::FORBIDDEN,
            ErrorCategory::InvalidState => StatusCode::CONFLICT,
            ErrorCategory::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<ApplicantError> for ApiError {
    fn from(err: ApplicantError) -> Self {
        Self(err.into())
    }
}

impl From<AssignmentError> for ApiError {
    fn from(err: AssignmentError) -> Self {
        Self(err.into())
    }
}

impl From<MessagingError> for ApiError {
    fn from(err: MessagingError) -> Self {
        Self(err.into())
    }
}

impl From<RewriteError> for ApiError {
    fn from(err: RewriteError) -> Self {
        Self(DomainError::new(err.code(), err.message()))
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let code = match err {
            AuthError::InsufficientPermissions => ErrorCode::Forbidden,
            AuthError::ServiceUnavailable(_) => ErrorCode::InternalError,
            AuthError::InvalidToken | AuthError::TokenExpired => ErrorCode::Unauthorized,
        };
        Self(DomainError::new(code, err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = %self.0.code, message = %self.0.message, "Request failed");
        } else {
            tracing::debug!(code = %self.0.code, message = %self.0.message, "Request rejected");
        }

        let DomainError {
            code,
            message,
            details,
        } = self.0;
        let body = ErrorResponse {
            code: code.to_string(),
            message,
            details: if details.is_empty() {
                None
            } else {
                serde_json::to_value(details).ok()
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ApplicantId;

    #[test]
    fn categories_map_onto_statuses() {
        assert_eq!(
            ApiError::bad_request("email", "missing").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ApplicantError::not_found(ApplicantId::new())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(MessagingError::permission("not your thread")).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(ApplicantError::invalid_transition("approved", "resubmit")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(DomainError::database("connection reset")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn collaborator_failures_are_bad_gateway() {
        assert_eq!(
            ApiError::from(ApplicantError::payment_failed("card declined")).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(RewriteError::RateLimited).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn expired_token_is_unauthorized() {
        assert_eq!(
            ApiError::from(AuthError::TokenExpired).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::InsufficientPermissions).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn body_carries_code_message_and_details() {
        let response = ApiError::bad_request("portfolio_number", "out of range").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert_eq!(body["message"], "out of range");
        assert_eq!(body["details"]["field"], "portfolio_number");
    }
}
