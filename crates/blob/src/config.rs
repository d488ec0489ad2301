//! Blob storage connection settings.

use crate::error::{BlobError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vercel Blob upload endpoint.
pub const DEFAULT_UPLOAD_URL: &str = "https://api.vercel.com/v8/blob/upload";

/// Environment variable holding the read/write token.
pub const TOKEN_ENV: &str = "BLOB_READ_WRITE_TOKEN";

/// Environment variable overriding the upload endpoint.
pub const UPLOAD_URL_ENV: &str = "BLOB_UPLOAD_URL";

/// Visibility of an uploaded blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Private,
}

impl Access {
    /// Value sent in the `access` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Private => "private",
        }
    }
}

/// Where and how to upload.
#[derive(Clone, PartialEq, Eq)]
pub struct BlobConfig {
    /// Upload endpoint URL.
    pub endpoint: String,
    /// Bearer token sent with every upload.
    pub token: String,
}

impl BlobConfig {
    /// Config for the default endpoint with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_UPLOAD_URL.to_string(),
            token: token.into(),
        }
    }

    /// Use a different upload endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Read the config from `BLOB_READ_WRITE_TOKEN` and `BLOB_UPLOAD_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV)
            .filter(|t| !t.trim().is_empty())
            .ok_or(BlobError::MissingToken(TOKEN_ENV))?;

        let mut config = Self::new(token);
        if let Some(endpoint) = lookup(UPLOAD_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config = config.with_endpoint(endpoint);
        }
        Ok(config)
    }
}

impl fmt::Debug for BlobConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}
