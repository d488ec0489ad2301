//! Blob storage uploads for generated decks.
//!
//! Connection settings are an explicit [`BlobConfig`] handed to the client at
//! construction. Only [`BlobConfig::from_env`] reads the environment, and the
//! client never calls it.

pub mod client;
pub mod config;
pub mod error;

pub use client::{interpret_response, BlobUploader, UploadedBlob, VercelBlobClient};
pub use config::{Access, BlobConfig};
pub use error::{BlobError, Result};
