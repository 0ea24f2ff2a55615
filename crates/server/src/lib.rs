//! Datamarket HTTP server
//!
//! Actix-web REST API over the catalog, the semantic search engine and the
//! chat assistant.

pub mod error;
pub mod routes;
pub mod state;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use routes::configure;
pub use state::AppState;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use datamarket_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// Build application state and serve until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    config.validate()?;
    config.ensure_directories()?;

    let bind_address = config.server_bind_address();
    let state = Arc::new(AppState::new(config)?);

    info!("Embedding model: {}", state.search.embedding_model());
    info!("Chat model: {}", state.config.chat_model);
    info!("Starting HTTP server on {}", bind_address);

    let data = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(configure)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
