// Builder API - Command Line Client

use clap::Parser;
use tracing::{error, info};

use builder_app::{authorization, run, Cli};
use builder_client::BuilderClient;
use builder_common::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.rust_log))
        .with_writer(std::io::stderr)
        .init();

    info!(server_url = %config.server_url, "Configuration loaded successfully");

    let client = BuilderClient::new(&config, authorization(&config)?);

    let output = run(cli.command, &client).await.map_err(|e| {
        error!("Command failed: {}", e);
        e
    })?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
