//! API Server setup

use am_db::MaintenanceDatabase;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes::create_router;
use crate::state::AppState;
use crate::ServerConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// CORS for the browser client: one origin, credentials allowed
fn cors_layer(origin: &str) -> Result<CorsLayer, BoxError> {
    let origin: HeaderValue = origin.parse()?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// Create the API server
pub async fn create_server(
    config: &ServerConfig,
    database: Arc<MaintenanceDatabase>,
) -> Result<(Router, SocketAddr), BoxError> {
    let jwt = config.jwt_config()?;
    let state = AppState::new(database, jwt).await?;

    let router = create_router(state)
        .layer(cors_layer(&config.cors_origin)?)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.bind_address().parse()?;

    Ok((router, addr))
}

/// Run the API server until ctrl-c
pub async fn run_server(
    config: &ServerConfig,
    database: Arc<MaintenanceDatabase>,
) -> Result<(), BoxError> {
    let (router, addr) = create_server(config, database).await?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Asset maintenance API listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
