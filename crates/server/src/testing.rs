//! Recording uploader for handler tests.

use deck_blob::{Access, BlobError, BlobUploader, UploadedBlob};
use serde_json::Value;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct UploadCall {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub access: Access,
}

#[derive(Debug, Clone)]
enum Outcome {
    Url(String),
    Reject(u16, Value),
}

/// Records every upload and answers with a fixed outcome.
#[derive(Debug, Clone)]
pub struct MockUploader {
    outcome: Outcome,
    calls: Arc<Mutex<Vec<UploadCall>>>,
}

impl MockUploader {
    pub fn returning_url(url: &str) -> Self {
        Self::with_outcome(Outcome::Url(url.to_string()))
    }

    pub fn rejecting(status: u16, detail: Value) -> Self {
        Self::with_outcome(Outcome::Reject(status, detail))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<UploadCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl BlobUploader for MockUploader {
    async fn upload(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        access: Access,
    ) -> deck_blob::Result<UploadedBlob> {
        self.calls.lock().unwrap().push(UploadCall {
            filename: filename.to_string(),
            bytes,
            access,
        });

        match &self.outcome {
            Outcome::Url(url) => Ok(UploadedBlob { url: url.clone() }),
            Outcome::Reject(status, detail) => Err(BlobError::Rejected {
                status: *status,
                detail: detail.clone(),
            }),
        }
    }
}
