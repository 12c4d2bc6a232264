//! Shared application state, handed to every handler via axum's `State` extractor.

use std::sync::Arc;

use xgw_ring::RingRegistry;

use crate::config::GatewayConfig;
use crate::identity::UserStore;
use crate::rings::GatewayRings;

/// Cheaply `Clone`-able handle shared across every request-handling task.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub rings: Arc<GatewayRings>,
    pub user_store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(
        config: GatewayConfig,
        registry: RingRegistry,
        user_store: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            rings: Arc::new(GatewayRings::from_registry(registry)),
            user_store,
        }
    }
}
