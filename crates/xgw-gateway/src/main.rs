//! C9 — the gateway process entry point.
//!
//! Bootstraps structured logging, attaches the three rings, serves the HTTP
//! surface, and on shutdown flushes and unmaps them cleanly.

use std::sync::Arc;

use tokio::signal;

use xgw_gateway::identity::InMemoryUserStore;
use xgw_gateway::{app, AppState, GatewayConfig};
use xgw_ring::RingRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = GatewayConfig::from_env();
    let paths = config.ring_paths();

    tracing::info!(spool_dir = %config.spool_dir, bind_addr = %config.bind_addr, "starting gateway");

    // The matching engine is expected to have bootstrapped the ring files
    // already in a real deployment; for a standalone run we create them if
    // they don't exist yet.
    if !paths.incoming_orders.exists() {
        tracing::warn!("ring files not found, bootstrapping a fresh set");
        RingRegistry::bootstrap(&paths)?;
    }

    let registry = RingRegistry::init_all(&paths)?;
    let user_store = Arc::new(InMemoryUserStore::default());
    let state = AppState::new(config.clone(), registry, user_store);
    let rings = Arc::clone(&state.rings);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(bind_addr = %config.bind_addr, "listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutting down, closing rings");
    match Arc::try_unwrap(rings) {
        Ok(rings) => rings.close_all(),
        Err(_) => tracing::error!("rings still had outstanding references at shutdown"),
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
