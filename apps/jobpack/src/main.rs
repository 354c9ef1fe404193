mod cli;
mod config;
mod document;
mod errors;
mod llm_client;
mod models;
mod parsing;
mod pipeline;
mod populate;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::pipeline::run_pipeline;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobpack v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let report = run_pipeline(
        &cli.inputs(&config),
        &cli.output(),
        &llm,
        &cli.options(&config),
    )
    .await?;

    println!("Output folder: {}", report.folder.display());
    for artifact in &report.artifacts {
        println!(
            "  [{:?}] {}: {}",
            artifact.stage,
            artifact.label,
            artifact.path.display()
        );
    }
    for stage in &report.skipped {
        println!("  [{stage:?}] skipped: template anchor not found");
    }
    if let Some(letter) = report.artifact("cover_letter") {
        info!("Cover letter ready at {}", letter.display());
    }

    Ok(())
}
