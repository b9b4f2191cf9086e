// src/server/error.rs
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::error::NdviError;

/// Errors returned by the HTTP layer, rendered as `{"detail": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Image file is empty.")]
    EmptyUpload,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Ndvi(#[from] NdviError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyUpload | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Ndvi(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Ndvi(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(e.body_text())
        } else {
            ApiError::BadRequest(e.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), %detail, "request failed");
        } else {
            warn!(status = status.as_u16(), %detail, "request rejected");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_core_errors_to_status_codes() {
        let invalid = ApiError::from(NdviError::InvalidBand {
            red_band: 0,
            nir_band: 1,
            band_count: 3,
        });
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let io = ApiError::from(NdviError::Io("bad header".to_string()));
        assert_eq!(io.status_code(), StatusCode::BAD_REQUEST);

        let unexpected = ApiError::from(NdviError::Unexpected("boom".to_string()));
        assert_eq!(unexpected.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(ApiError::EmptyUpload.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn core_message_is_passed_through() {
        let err = ApiError::from(NdviError::Io("bad header".to_string()));
        assert_eq!(err.to_string(), "I/O error: could not read image. bad header");
    }
}
