//! Deck server binary entry point

use anyhow::{Context, Result};
use deck_blob::VercelBlobClient;
use deck_server::{start_server, AppState, ServerConfig};
use env_logger::Env;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;
    log::debug!("Configuration: {:?}", config);

    let uploader = VercelBlobClient::new(config.blob);
    let state = AppState::with_options(uploader, config.deck);

    start_server(&config.addr, state)
        .await
        .with_context(|| format!("Server on {} stopped", config.addr))?;

    Ok(())
}
