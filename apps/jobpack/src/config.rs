use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MAX_TOKENS;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub max_tokens: u32,
    pub assets_dir: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            max_tokens: match std::env::var("JOBPACK_MAX_TOKENS") {
                Ok(v) => v
                    .parse::<u32>()
                    .context("JOBPACK_MAX_TOKENS must be a positive integer")?,
                Err(_) => DEFAULT_MAX_TOKENS,
            },
            assets_dir: std::env::var("JOBPACK_ASSETS_DIR")
                .unwrap_or_else(|_| "assets".to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
