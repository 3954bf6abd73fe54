//! Uplink Daemon - Main entry point
//!
//! Serves the WASM frontend and accepts contact messages.

mod api;
mod auth;
mod config;
mod server;
mod state;
mod store;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "uplink")]
#[command(about = "Portfolio web server and contact uplink")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "uplink.toml")]
    config: PathBuf,

    /// Bind address for web server
    #[arg(short, long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", config::default_config_toml()?);
        return Ok(());
    }

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Uplink v{}", env!("CARGO_PKG_VERSION"));

    let mut config = config::load_config(&args.config)?;

    if let Some(bind) = args.bind {
        config.daemon.bind = bind;
    }

    info!(
        web = %config.web.static_dir,
        store = %config.contact.store_path,
        "Configuration loaded"
    );
    if config.admin.token.as_deref().map_or(true, str::is_empty) {
        warn!("No [admin] token configured, /api/messages is disabled");
    }

    let state = state::AppState::new(config.clone())?;

    server::run(state, &config.daemon.bind, config.daemon.tls.as_ref()).await?;

    Ok(())
}
