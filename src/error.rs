//! Service-level error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::capacity::EstimateError;
use crate::presentation::PresentationError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Estimate(#[from] EstimateError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Presentation(#[from] PresentationError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to clients.
    fn public_message(&self) -> String {
        match self {
            Self::Config(_) | Self::Estimate(EstimateError::Configuration(_)) => "capacity configuration error".into(),
            Self::Estimate(EstimateError::DataIntegrity(_)) => "order data integrity error".into(),
            Self::Estimate(EstimateError::OutOfRange { .. }) => "estimated date out of range".into(),
            Self::Store(StoreError::BacklogUnavailable(_)) => "order backlog unavailable".into(),
            Self::Store(StoreError::ConfigUnavailable(_)) => "capacity config unavailable".into(),
            Self::Presentation(_) => "could not format estimated date".into(),
            Self::InvalidRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "rejected request");
        }
        (status, Json(json!({ "ok": false, "error": self.public_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::InvalidRequest("bad".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::Estimate(EstimateError::Configuration(0)).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(Error::Estimate(EstimateError::DataIntegrity(-1)).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(Error::Store(StoreError::BacklogUnavailable("x".into())).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(Error::Store(StoreError::ConfigUnavailable("x".into())).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_responses_do_not_leak_details() {
        let response = Error::Store(StoreError::BacklogUnavailable("password authentication failed for user".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({ "ok": false, "error": "order backlog unavailable" }));
    }
}
