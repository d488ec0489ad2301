//! Upload client for the Vercel Blob API.

use crate::config::{Access, BlobConfig};
use crate::error::{BlobError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use std::future::Future;

/// Content type of generated decks.
pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// A successfully stored blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedBlob {
    /// Retrievable URL of the stored file.
    pub url: String,
}

/// Stores a file and returns where it can be fetched.
pub trait BlobUploader: Send + Sync {
    /// Upload `bytes` under `filename`. One attempt, no retries.
    fn upload(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        access: Access,
    ) -> impl Future<Output = Result<UploadedBlob>> + Send;
}

/// Client for the Vercel Blob upload endpoint.
#[derive(Debug, Clone)]
pub struct VercelBlobClient {
    config: BlobConfig,
    http: reqwest::Client,
}

impl VercelBlobClient {
    /// Create a client with the default HTTP settings.
    pub fn new(config: BlobConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_http_client(config: BlobConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &BlobConfig {
        &self.config
    }
}

impl BlobUploader for VercelBlobClient {
    async fn upload(&self, filename: &str, bytes: Vec<u8>, access: Access) -> Result<UploadedBlob> {
        log::info!(
            "Uploading {} ({} bytes, {}) to {}",
            filename,
            bytes.len(),
            access.as_str(),
            self.config.endpoint
        );

        let file = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(PPTX_CONTENT_TYPE)?;
        let form = Form::new()
            .part("file", file)
            .text("access", access.as_str());

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        interpret_response(status, &body)
    }
}

/// Turn the endpoint's answer into a blob or an error.
///
/// A success status must carry a JSON body with a string `url`. Any other
/// status is a rejection whose detail is the JSON body, or `{}` when the body
/// is not JSON.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<UploadedBlob> {
    let detail = serde_json::from_slice::<Value>(body).ok();

    if !status.is_success() {
        let detail = detail.unwrap_or_else(|| Value::Object(Default::default()));
        log::warn!("Upload rejected with status {}: {}", status, detail);
        return Err(BlobError::Rejected {
            status: status.as_u16(),
            detail,
        });
    }

    let detail = detail.unwrap_or(Value::Null);
    match detail.get("url").and_then(Value::as_str) {
        Some(url) => {
            log::info!("Upload stored at {}", url);
            Ok(UploadedBlob {
                url: url.to_string(),
            })
        }
        None => {
            log::warn!("Upload succeeded without a URL: {}", detail);
            Err(BlobError::MissingUrl { detail })
        }
    }
}
