//! Service entrypoint: environment loading, logging setup, server start.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use shortlink::{config, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present; deployed environments set variables directly.
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    init_tracing(&config.log_level, &config.log_format);

    config.print_summary();

    server::run(config).await
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes priority over the configured level. JSON output is
/// for deployments behind a log collector; text is for humans.
fn init_tracing(log_level: &str, log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
