//! C3 — the process-wide ring registry.
//!
//! Initialized once before request handling begins and torn down once at
//! process exit; in between it is read-only and may be shared across any
//! number of request-handling tasks via `Arc`.

use tracing::{error, info};

use crate::error::AttachError;
use crate::paths::RingPaths;
use crate::record::{CancelRecord, OrderRecord, QueryRecord};
use crate::ring::Ring;

/// Owns the three named rings for the lifetime of the process.
pub struct RingRegistry {
    pub incoming_orders: Ring<OrderRecord>,
    pub cancel_orders: Ring<CancelRecord>,
    pub queries: Ring<QueryRecord>,
}

impl RingRegistry {
    /// One-time bootstrap: creates (truncating any existing file) all three
    /// ring files at `paths`. Meant for a setup step run exactly once before
    /// either the gateway or the engine attaches, never on the hot path.
    pub fn bootstrap(paths: &RingPaths) -> Result<(), AttachError> {
        Ring::<OrderRecord>::create(&paths.incoming_orders)?.close();
        Ring::<CancelRecord>::create(&paths.cancel_orders)?.close();
        Ring::<QueryRecord>::create(&paths.queries)?.close();
        info!("all three rings bootstrapped");
        Ok(())
    }

    /// Opens the three rings from their conventional paths. Fails fast on
    /// any error. Not idempotent — call this exactly once per process.
    pub fn init_all(paths: &RingPaths) -> Result<Self, AttachError> {
        let incoming_orders = Ring::<OrderRecord>::open(&paths.incoming_orders)?;
        let cancel_orders = Ring::<CancelRecord>::open(&paths.cancel_orders)?;
        let queries = Ring::<QueryRecord>::open(&paths.queries)?;

        info!("all three rings attached successfully");
        Ok(Self {
            incoming_orders,
            cancel_orders,
            queries,
        })
    }

    /// Closes each ring, logging (but not propagating) per-ring errors so a
    /// failure on one ring doesn't prevent closing the others.
    pub fn close_all(self) {
        let Self {
            incoming_orders,
            cancel_orders,
            queries,
        } = self;

        if let Err(e) = incoming_orders.flush() {
            error!(error = %e, "failed to flush incoming_orders ring on close");
        }
        incoming_orders.close();

        if let Err(e) = cancel_orders.flush() {
            error!(error = %e, "failed to flush cancel_orders ring on close");
        }
        cancel_orders.close();

        if let Err(e) = queries.flush() {
            error!(error = %e, "failed to flush queries ring on close");
        }
        queries.close();
    }
}
