// MirageDB server entrypoint
//!
//! The heavy lifting (bootstrapping the graph, wiring the HTTP server) lives
//! in dedicated modules so this file remains a thin orchestrator.

mod config;
mod lifecycle;
mod logging;

use anyhow::Result;
use config::ServerConfig;
use log::info;
use std::env;

#[actix_web::main]
async fn main() -> Result<()> {
    let config_path = env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = match ServerConfig::from_file(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("FATAL: {e:#}");
            std::process::exit(1);
        }
    };

    // Logging before any other side effects
    logging::init_logging(
        &config.logging.level,
        config.logging.log_file.as_deref(),
        config.logging.log_to_console,
        &config.logging.format,
    )?;

    info!("Configuration loaded from {config_path}");
    let state = lifecycle::bootstrap(&config)?;
    lifecycle::run(&config, state).await
}
