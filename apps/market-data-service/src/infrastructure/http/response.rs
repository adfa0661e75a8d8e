//! HTTP response bodies and status mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::RequestOutcome;

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub detail: String,
}

impl ErrorResponse {
    /// Build an error response with the given status.
    pub fn with_status(status: StatusCode, detail: impl Into<String>) -> Response {
        (
            status,
            Json(Self {
                detail: detail.into(),
            }),
        )
            .into_response()
    }
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests.
    pub status: String,
}

impl HealthResponse {
    /// The healthy response.
    #[must_use]
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

impl<T: Serialize> IntoResponse for RequestOutcome<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Success(body) => (StatusCode::OK, Json(body)).into_response(),
            Self::NotFound(detail) => ErrorResponse::with_status(StatusCode::NOT_FOUND, detail),
            Self::Internal(detail) => {
                ErrorResponse::with_status(StatusCode::INTERNAL_SERVER_ERROR, detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(RequestOutcome::Success(1), StatusCode::OK ; "success")]
    #[test_case(RequestOutcome::NotFound("none".into()), StatusCode::NOT_FOUND ; "not found")]
    #[test_case(RequestOutcome::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR ; "internal")]
    fn outcome_status(outcome: RequestOutcome<i32>, expected: StatusCode) {
        assert_eq!(outcome.into_response().status(), expected);
    }

    #[test]
    fn health_body() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert_eq!(json, r#"{"status":"healthy"}"#);
    }
}
