// src/server/mod.rs
pub mod error;
pub mod handlers;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cli::ServerConfig;

pub use error::ApiError;

/// Builds the application router.
pub fn router(config: &ServerConfig) -> Result<Router> {
    let app = Router::new()
        .route("/", get(handlers::root))
        .route("/analyze/ndvi/", post(handlers::compute_ndvi))
        .route("/analyze/ndvi", post(handlers::compute_ndvi))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes()))
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn cors_layer(config: &ServerConfig) -> Result<CorsLayer> {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| HeaderValue::from_str(o))
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Serves the API until Ctrl-C is received.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let app = router(&config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, max_upload_mb = config.max_upload_mb, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
