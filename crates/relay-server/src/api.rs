//! Error mapping shared by the API handlers.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_llm::LlmError;
use relay_types::ErrorDetail;
use relay_voice::VoiceError;
use thiserror::Error;

/// API error type mapping to HTTP status codes.
///
/// Every provider failure collapses to a 500 whose `detail` is the error's
/// display text. Callers cannot tell transient failures from permanent ones.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be decoded.
    #[error("{1}")]
    InvalidRequest(StatusCode, String),
    /// The LLM or TTS provider call failed.
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(status, _) => *status,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorDetail {
            detail: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<VoiceError> for ApiError {
    fn from(err: VoiceError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.status(), rejection.body_text())
    }
}
