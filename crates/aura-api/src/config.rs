//! Environment configuration for the API binary.
//!
//! Every knob has a default except the provider key: a server that can
//! never reach the completion provider should not come up at all.

use aura_core::SchemaMode;
use thiserror::Error;

/// Default provider endpoint (OpenAI-compatible chat completions).
pub const DEFAULT_PROVIDER_URL: &str = "https://api.asi1.ai/v1/chat/completions";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CONFIG/MISSING: {0} is not set")]
    Missing(&'static str),
    #[error("CONFIG/INVALID: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address, `AURA_ADDR`
    pub addr: String,
    /// Completion endpoint, `AURA_PROVIDER_URL`
    pub provider_url: String,
    /// Bearer token for the provider, `AURA_PROVIDER_KEY` (required)
    pub provider_key: String,
    /// Model name, `AURA_MODEL`
    pub model: String,
    /// CORS origin allowlist, `AURA_ALLOWED_ORIGINS` (comma-separated)
    pub allowed_origins: Vec<String>,
    /// Reply schema the deployment commits to, `AURA_SCHEMA_MODE`
    pub mode: SchemaMode,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider_key = std::env::var("AURA_PROVIDER_KEY")
            .map_err(|_| ConfigError::Missing("AURA_PROVIDER_KEY"))?;

        let mode = match std::env::var("AURA_SCHEMA_MODE") {
            Ok(word) => SchemaMode::parse(&word).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "AURA_SCHEMA_MODE must be 'generic' or 'restricted', got '{}'",
                    word
                ))
            })?,
            Err(_) => SchemaMode::Restricted,
        };

        Ok(Self {
            addr: std::env::var("AURA_ADDR").unwrap_or_else(|_| "0.0.0.0:8787".to_string()),
            provider_url: std::env::var("AURA_PROVIDER_URL")
                .unwrap_or_else(|_| DEFAULT_PROVIDER_URL.to_string()),
            provider_key,
            model: std::env::var("AURA_MODEL").unwrap_or_else(|_| "asi1-mini".to_string()),
            allowed_origins: parse_origins(
                &std::env::var("AURA_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            ),
            mode,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_split_on_commas_and_trim() {
        assert_eq!(
            parse_origins("http://localhost:3000, https://app.example.com ,"),
            vec![
                "http://localhost:3000".to_string(),
                "https://app.example.com".to_string(),
            ]
        );
    }

    #[test]
    fn empty_origin_list_stays_empty() {
        assert!(parse_origins("").is_empty());
    }
}
