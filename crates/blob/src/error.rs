//! Error types for blob uploads.

use serde_json::Value;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, BlobError>;

/// Errors that can occur while uploading a blob.
#[derive(Error, Debug)]
pub enum BlobError {
    /// No write token was configured.
    #[error("Blob storage token is not configured (set {0})")]
    MissingToken(&'static str),

    /// The storage endpoint answered with a non-success status.
    #[error("Upload rejected with status {status}")]
    Rejected { status: u16, detail: Value },

    /// The storage endpoint accepted the upload but returned no URL.
    #[error("Upload response did not include a URL")]
    MissingUrl { detail: Value },

    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl BlobError {
    /// Diagnostic payload returned by the endpoint, if there was one.
    pub fn detail(&self) -> Option<&Value> {
        match self {
            BlobError::Rejected { detail, .. } | BlobError::MissingUrl { detail } => Some(detail),
            _ => None,
        }
    }
}
