//! Request-level errors and their JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use deck_blob::BlobError;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Everything that can go wrong while handling one request.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The endpoint was called with something other than `POST`.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The input could not be parsed or the deck could not be built.
    #[error(transparent)]
    Input(#[from] deck_core::Error),

    /// The storage endpoint rejected the upload or returned no URL.
    #[error("Upload failed")]
    UploadFailed { detail: Value },

    /// Any other failure.
    #[error("{0}")]
    Internal(String),
}

impl From<BlobError> for ApiError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::Rejected { detail, .. } | BlobError::MissingUrl { detail } => {
                ApiError::UploadFailed { detail }
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::warn!("Request rejected: {}", self);
        }

        let error = self.to_string();
        let detail = match self {
            ApiError::UploadFailed { detail } => Some(detail),
            _ => None,
        };

        (status, Json(ErrorBody { error, detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blob_rejection_becomes_upload_failed() {
        let err: ApiError = BlobError::Rejected {
            status: 403,
            detail: json!({"error": "forbidden"}),
        }
        .into();
        assert!(matches!(err, ApiError::UploadFailed { ref detail } if detail["error"] == "forbidden"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_token_is_internal() {
        let err: ApiError = BlobError::MissingToken("BLOB_READ_WRITE_TOKEN").into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_deck_error_message_is_passed_through() {
        let err: ApiError = deck_core::Error::MalformedInput("bad count".to_string()).into();
        assert_eq!(err.to_string(), "Malformed input: bad count");
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(ApiError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            ApiError::Internal("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_omits_missing_detail() {
        let body = ErrorBody {
            error: "Method not allowed".to_string(),
            detail: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": "Method not allowed"})
        );
    }
}
