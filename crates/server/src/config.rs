//! Server configuration, read once at startup.

use anyhow::{Context, Result};
use deck_blob::BlobConfig;
use deck_pptx::DeckOptions;
use std::path::Path;

/// Bind address environment variable.
pub const ADDR_ENV: &str = "DECK_SERVER_ADDR";
/// Optional path to a JSON file of deck option overrides.
pub const DECK_OPTIONS_ENV: &str = "DECK_OPTIONS";
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub blob: BlobConfig,
    pub deck: DeckOptions,
}

impl ServerConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup(ADDR_ENV)
            .filter(|addr| !addr.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());

        let blob = BlobConfig::from_lookup(&lookup).context("Blob storage is not configured")?;

        let deck = match lookup(DECK_OPTIONS_ENV) {
            Some(path) if !path.trim().is_empty() => load_deck_options(Path::new(&path))?,
            _ => DeckOptions::default(),
        };

        Ok(Self { addr, blob, deck })
    }
}

/// Read deck options from a JSON file. Missing keys keep their defaults.
pub fn load_deck_options(path: &Path) -> Result<DeckOptions> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read deck options from {:?}", path))?;
    let options = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid deck options in {:?}", path))?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_token() {
        let config = ServerConfig::from_lookup(lookup(&[("BLOB_READ_WRITE_TOKEN", "tok")])).unwrap();
        assert_eq!(config.addr, DEFAULT_ADDR);
        assert_eq!(config.blob.token, "tok");
        assert_eq!(config.deck, DeckOptions::default());
    }

    #[test]
    fn test_custom_addr() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("BLOB_READ_WRITE_TOKEN", "tok"),
            (ADDR_ENV, "127.0.0.1:9000"),
        ]))
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000");
    }

    #[test]
    fn test_missing_token_fails() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("Blob storage is not configured"));
    }

    #[test]
    fn test_deck_options_file() {
        let path = std::env::temp_dir().join(format!("deck-options-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"company_line": "Acme Corp"}"#).unwrap();

        let config = ServerConfig::from_lookup(lookup(&[
            ("BLOB_READ_WRITE_TOKEN", "tok"),
            (DECK_OPTIONS_ENV, path.to_str().unwrap()),
        ]))
        .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.deck.company_line, "Acme Corp");
        assert_eq!(config.deck.width_cm, DeckOptions::default().width_cm);
    }

    #[test]
    fn test_unreadable_deck_options_fails() {
        let result = ServerConfig::from_lookup(lookup(&[
            ("BLOB_READ_WRITE_TOKEN", "tok"),
            (DECK_OPTIONS_ENV, "/nonexistent/deck-options.json"),
        ]));
        assert!(result.is_err());
    }
}
