//! pipeline-demo: a static HTTP responder for CI/CD pipeline checks.
//!
//! This is the application entry point. It parses the command line, loads
//! configuration, initializes tracing, builds the Axum router and runs the
//! HTTP server until a shutdown signal arrives.

use std::path::PathBuf;

use clap::Parser;

use pipeline_demo::config::{AppConfig, CONFIG_SEARCH_PATHS, PORT_ENV_VAR};
use pipeline_demo::{create_router, start_server, telemetry};

/// pipeline-demo: answers /, /hello and /health with fixed text
#[derive(Parser, Debug)]
#[command(name = "pipeline-demo", version, about)]
struct Args {
    /// Path to configuration file [default: first of config/default.toml,
    /// /etc/pipeline-demo.toml that exists]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides SERVER_PORT and the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level filter (e.g., "pipeline_demo=debug")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // An explicitly named file must exist; the search paths are optional
    let (mut config, source) = match args.config {
        Some(path) => (AppConfig::load(&path)?, Some(path)),
        None => AppConfig::discover(CONFIG_SEARCH_PATHS)?,
    };

    let env_port = std::env::var(PORT_ENV_VAR).ok();
    config.apply_port_overrides(env_port.as_deref(), args.port)?;

    let log_filter = telemetry::resolve_filter(args.log_level, std::env::var("RUST_LOG").ok());
    telemetry::init(&log_filter, config.logging.format);

    let source = source.map_or_else(
        || "built-in defaults".to_string(),
        |p| p.display().to_string(),
    );
    tracing::info!(
        %source,
        host = %config.http.host,
        port = config.http.port,
        shutdown_timeout_secs = config.http.shutdown_timeout_seconds,
        log_format = ?config.logging.format,
        "Loaded configuration"
    );

    let app = create_router();
    start_server(app, &config).await?;

    Ok(())
}
