use std::path::PathBuf;

use clap::Parser;

use api_path_rewrite::config::{GatewayConfig, load_config};
use api_path_rewrite::lifecycle::startup;
use api_path_rewrite::observability::logging;

#[derive(Parser)]
#[command(name = "api-path-rewrite")]
#[command(about = "Normalizes /v1 and /v1beta prefixes in front of an AI API gateway", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        request_timeout_secs = config.timeouts.request_secs,
        "api-path-rewrite starting"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
