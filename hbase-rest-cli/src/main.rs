//! HBase REST CLI - talks to an HBase REST gateway (`hbase rest start`).

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;

use cli::Cli;
use commands::ReadSettings;
use config::Config;
use hbase_rest_client::GatewayClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref()).map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Check hbase-rest.toml or the HBASE_REST__SECTION__KEY environment variables.",
            e
        )
    })?;

    // Command-line flags override file and environment
    if let Some(host) = cli.host {
        config.gateway.host = host;
        config.gateway.base_url = None;
    }
    if let Some(port) = cli.port {
        config.gateway.port = port;
        config.gateway.base_url = None;
    }
    if cli.raw {
        config.read.decode = false;
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_url = config.gateway.base_url();
    tracing::info!("Using gateway at {}", base_url);

    let client = GatewayClient::with_base_url(&base_url);
    let read = ReadSettings {
        decode: config.read.decode,
        scan_batch: config.read.scan_batch,
    };

    let mut stdout = std::io::stdout().lock();
    commands::run(&client, cli.command, read, &mut stdout).await
}
