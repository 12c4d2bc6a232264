//! Send-success/backpressure counters for the batch sender (C11), in the
//! style of the ring-buffer crate's own `Metrics` struct — a plain counter
//! bag, no external metrics backend wired up.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::adapters::batch::SendOutcome;

#[derive(Debug, Default)]
pub struct SendMetrics {
    pub sent_immediate: AtomicU64,
    pub sent_after_retry: AtomicU64,
    pub backpressure_events: AtomicU64,
    pub gave_up: AtomicU64,
}

impl SendMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, outcome: SendOutcome) {
        match outcome {
            SendOutcome::Immediate => {
                self.sent_immediate.fetch_add(1, Ordering::Relaxed);
            }
            SendOutcome::RetriedThenSucceeded { .. } => {
                self.sent_after_retry.fetch_add(1, Ordering::Relaxed);
                self.backpressure_events.fetch_add(1, Ordering::Relaxed);
            }
            SendOutcome::GaveUp => {
                self.gave_up.fetch_add(1, Ordering::Relaxed);
                self.backpressure_events.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn snapshot(&self) -> (u64, u64, u64, u64) {
        (
            self.sent_immediate.load(Ordering::Relaxed),
            self.sent_after_retry.load(Ordering::Relaxed),
            self.backpressure_events.load(Ordering::Relaxed),
            self.gave_up.load(Ordering::Relaxed),
        )
    }
}
