//! Server lifecycle management helpers.
//!
//! Encapsulates the heavy lifting so `main.rs` stays a thin orchestrator:
//! loading the schema and seed documents, building the shared application
//! state, and running the HTTP server.

use std::fs;
use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use log::info;

use mirage_api::{configure_routes, AppState, MemoryStore};
use mirage_commons::Metadata;

use crate::config::ServerConfig;

/// Load the schema description and the seed data, and assemble the shared
/// application state.
pub fn bootstrap(config: &ServerConfig) -> Result<Arc<AppState>> {
    let description = fs::read_to_string(&config.graph.schema_path)
        .with_context(|| format!("cannot read schema from {}", config.graph.schema_path))?;
    let metadata = Metadata::parse(&description)
        .with_context(|| format!("cannot parse schema from {}", config.graph.schema_path))?;
    info!(
        "Schema loaded: {} resources from {}",
        metadata.resources().len(),
        config.graph.schema_path
    );

    let seed = fs::read_to_string(&config.graph.data_path)
        .with_context(|| format!("cannot read seed data from {}", config.graph.data_path))?;
    let store = MemoryStore::from_seed(&seed)
        .with_context(|| format!("cannot load seed data from {}", config.graph.data_path))?;

    Ok(Arc::new(AppState::new(Arc::new(metadata), Arc::new(store))))
}

/// Bind and run the HTTP server until it is stopped.
pub async fn run(config: &ServerConfig, state: Arc<AppState>) -> Result<()> {
    let bind_addr = config.bind_address();
    info!("Starting HTTP server on {}:{}", bind_addr.0, bind_addr.1);

    let data = web::Data::from(state);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(data.clone())
            .configure(configure_routes)
    })
    .workers(config.server.workers)
    .bind(bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
