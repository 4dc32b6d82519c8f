//! API Server setup

use std::net::SocketAddr;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::metrics::metrics_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Router with the full middleware stack
pub fn build_app(state: AppState, enable_cors: bool) -> Router {
    let mut router = create_router(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

/// Create the API server
pub async fn create_server(
    config: ServerConfig,
) -> Result<(Router, SocketAddr), Box<dyn std::error::Error + Send + Sync>> {
    let state = AppState::open(&config).await?;
    let router = build_app(state, config.enable_cors);

    let addr: SocketAddr = config.bind_address().parse()?;

    Ok((router, addr))
}

/// Run the API server until ctrl-c
pub async fn run_server(
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (router, addr) = create_server(config).await?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Policy API server listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Policy API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
