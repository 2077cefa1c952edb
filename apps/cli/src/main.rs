use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use seoscribe::cache::Cache;
use seoscribe::client::retry::DEFAULT_ATTEMPTS;
use seoscribe::client::ApiClient;
use seoscribe::commands::{self, Commands};
use seoscribe::config::Config;

#[derive(Debug, Parser)]
#[command(name = "seoscribe", version, about = "AI-assisted SEO content optimization")]
struct Cli {
    /// Attempts per request; only timeouts and transport failures retry
    #[arg(long, global = true, default_value_t = DEFAULT_ATTEMPTS)]
    attempts: u32,
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so the log filter default is available
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Startup step, not an import-time side effect: clears stale session
    // state when the version stamp changed.
    let cache = Cache::open(&config.state_dir)?;

    let client = ApiClient::with_timeout(&config.api_url, Duration::from_millis(config.timeout_ms));
    debug!(backend = %config.api_url, timeout_ms = config.timeout_ms, "client configured");

    commands::run(cli.command, &client, &cache, cli.attempts).await
}
