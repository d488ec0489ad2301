//! Request handlers.

use crate::error::ApiError;
use crate::pipeline::{create_deck, request_text};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::Json;
use deck_blob::BlobUploader;
use serde::{Deserialize, Serialize};

/// Successful deck creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeckCreated {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build a deck from the request text and upload it.
///
/// Routed for every method so that non-`POST` requests get the JSON 405 body
/// instead of the router's empty one.
pub async fn create_ppt<U>(
    State(state): State<AppState<U>>,
    method: Method,
    body: Bytes,
) -> Response
where
    U: BlobUploader + 'static,
{
    if method != Method::POST {
        return ApiError::MethodNotAllowed.into_response();
    }

    match handle_create(&state, &body).await {
        Ok(created) => {
            log::info!("Deck uploaded to {}", created.url);
            Json(created).into_response()
        }
        Err(err) => err.into_response(),
    }
}

async fn handle_create<U: BlobUploader>(
    state: &AppState<U>,
    body: &[u8],
) -> Result<DeckCreated, ApiError> {
    let text = request_text(body)?;
    let blob = create_deck(&text, &state.parser, &state.renderer, state.uploader.as_ref()).await?;
    Ok(DeckCreated { url: blob.url })
}
