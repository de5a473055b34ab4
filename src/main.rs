// src/main.rs
mod config;
mod corpus;
mod extractors;
mod server;
mod utils;

use std::path::PathBuf;

use clap::Parser;

use config::ServerConfig;
use utils::AppError;

/// CTS text service: serves CEX citation data as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "./config.json")]
    config: PathBuf,

    /// Directory served under /static/
    #[arg(long, default_value = "./static")]
    static_dir: PathBuf,

    /// Override the configured bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured bind port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting with args: {:?}", args);

    // 3. Load configuration once; handlers only ever see the loaded copy
    let mut config = ServerConfig::load(&args.config)?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    tracing::info!("Serving CEX documents from {}", config.cex_source);

    // 4. Serve until shutdown
    server::serve(config, args.static_dir).await
}
