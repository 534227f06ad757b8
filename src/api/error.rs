use crate::error::{DeskError, ErrorKind};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Error returned by every handler, rendered as `{"error": message}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// HTTP status for an error classification
#[must_use]
pub const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation
        | ErrorKind::InvalidTransition
        | ErrorKind::InvalidAssignee
        | ErrorKind::DuplicateKey => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DeskError> for ApiError {
    fn from(err: DeskError) -> Self {
        let status = status_for(err.kind());
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {err}");
            "Internal server error".to_string()
        } else {
            err.to_string()
        };
        Self { status, message }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {rejection}");
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Status;

    #[test]
    fn test_client_errors_keep_their_message() {
        let err = ApiError::from(DeskError::InvalidTransition {
            from: Status::Open,
            to: Status::Closed,
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid status transition from OPEN to CLOSED");

        assert_eq!(ApiError::from(DeskError::Forbidden).status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::from(DeskError::DuplicateKey { field: "email".into() }).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let err = ApiError::from(DeskError::Lock("stuck".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Internal server error");
    }
}
