//! Producer-side serialization.
//!
//! `xgw_ring::Ring` is a single-producer/single-consumer primitive, but the
//! gateway has many concurrent request-handling tasks that all want to
//! enqueue. We resolve that by serializing producer access with an async
//! mutex per ring: at any instant exactly one task is the producer, which
//! satisfies the ring's contract without the engine side ever knowing
//! multiple logical callers exist.

use tokio::sync::Mutex;

use xgw_ring::{EnqueueOutcome, Ring, RingRegistry, WireRecord};

use crate::error::AppError;

/// Wraps one `Ring` with the mutex that makes concurrent callers safe.
pub struct SerializedProducer<R: WireRecord> {
    name: &'static str,
    ring: Ring<R>,
    lock: Mutex<()>,
}

impl<R: WireRecord> SerializedProducer<R> {
    pub fn new(name: &'static str, ring: Ring<R>) -> Self {
        Self {
            name,
            ring,
            lock: Mutex::new(()),
        }
    }

    /// Enqueues `record`, serialized against every other concurrent caller.
    pub async fn enqueue(&self, record: R) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        match self.ring.enqueue(record) {
            EnqueueOutcome::Ok => Ok(()),
            EnqueueOutcome::Full => Err(AppError::RingFull(self.name)),
        }
    }

    pub fn depth(&self) -> u64 {
        self.ring.depth()
    }
}

/// The three conventional rings, each behind its own producer serialization.
pub struct GatewayRings {
    pub incoming_orders: SerializedProducer<xgw_ring::OrderRecord>,
    pub cancel_orders: SerializedProducer<xgw_ring::CancelRecord>,
    pub queries: SerializedProducer<xgw_ring::QueryRecord>,
}

impl GatewayRings {
    pub fn from_registry(registry: RingRegistry) -> Self {
        Self {
            incoming_orders: SerializedProducer::new("incoming_orders", registry.incoming_orders),
            cancel_orders: SerializedProducer::new("cancel_orders", registry.cancel_orders),
            queries: SerializedProducer::new("queries", registry.queries),
        }
    }

    /// Flushes and unmaps the three rings. Called once, at shutdown.
    pub fn close_all(self) {
        if let Err(e) = self.incoming_orders.ring.flush() {
            tracing::error!(error = %e, "failed to flush incoming_orders ring on close");
        }
        self.incoming_orders.ring.close();

        if let Err(e) = self.cancel_orders.ring.flush() {
            tracing::error!(error = %e, "failed to flush cancel_orders ring on close");
        }
        self.cancel_orders.ring.close();

        if let Err(e) = self.queries.ring.flush() {
            tracing::error!(error = %e, "failed to flush queries ring on close");
        }
        self.queries.ring.close();
    }
}
