//! HTTP endpoint for venue recommendation decks.
//!
//! `POST /api/create_ppt` takes the recommendation text (raw, or as the `text`
//! field of a JSON object), builds the deck, uploads it and answers with the
//! public URL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod testing;

use axum::extract::DefaultBodyLimit;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::Router;
use deck_blob::BlobUploader;
use deck_core::InputParser;
use deck_pptx::{DeckOptions, DeckRenderer};
use std::any::Any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorBody};
pub use handlers::{create_ppt, health_check, DeckCreated, HealthStatus};
pub use pipeline::{create_deck, request_text};

/// State shared across handlers
pub struct AppState<U> {
    pub uploader: Arc<U>,
    pub renderer: Arc<DeckRenderer>,
    pub parser: InputParser,
}

impl<U> AppState<U> {
    /// State with the default deck layout.
    pub fn new(uploader: U) -> Self {
        Self::with_options(uploader, DeckOptions::default())
    }

    pub fn with_options(uploader: U, options: DeckOptions) -> Self {
        Self {
            uploader: Arc::new(uploader),
            renderer: Arc::new(DeckRenderer::new().with_options(options)),
            parser: InputParser::new(),
        }
    }
}

// Manual impl: `U` itself does not need to be `Clone`.
impl<U> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            uploader: Arc::clone(&self.uploader),
            renderer: Arc::clone(&self.renderer),
            parser: self.parser.clone(),
        }
    }
}

/// Build the API router with all endpoints
///
/// Request bodies have no size limit.
pub fn build_router<U>(state: AppState<U>) -> Router
where
    U: BlobUploader + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/create_ppt", any(create_ppt::<U>))
        .layer(DefaultBodyLimit::disable())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };
    ApiError::Internal(message).into_response()
}

/// Serve on an already bound listener.
pub async fn serve<U>(listener: TcpListener, state: AppState<U>) -> Result<(), std::io::Error>
where
    U: BlobUploader + 'static,
{
    axum::serve(listener, build_router(state)).await
}

/// Start the API server
pub async fn start_server<U>(addr: &str, state: AppState<U>) -> Result<(), std::io::Error>
where
    U: BlobUploader + 'static,
{
    log::info!("Starting deck server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    serve(listener, state).await
}
