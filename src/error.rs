use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::error;

use crate::schemas::ErrorResponse;

/// Errors returned by the API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Forecasting service unreachable: {source}")]
    Upstream {
        #[from]
        source: reqwest::Error,
    },

    #[error("Forecasting service returned {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("Forecasting service returned invalid JSON: {source}")]
    UpstreamBody {
        #[from]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream { source } if source.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream { .. }
            | ApiError::UpstreamStatus { .. }
            | ApiError::UpstreamBody { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Upstream { source } if source.is_timeout() => "UPSTREAM_TIMEOUT",
            ApiError::Upstream { .. } => "UPSTREAM_UNREACHABLE",
            ApiError::UpstreamStatus { .. } => "UPSTREAM_ERROR",
            ApiError::UpstreamBody { .. } => "UPSTREAM_INVALID_RESPONSE",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!("Request failed with {}: {}", status, self);

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
            success: false,
        };
        (status, Json(body)).into_response()
    }
}
