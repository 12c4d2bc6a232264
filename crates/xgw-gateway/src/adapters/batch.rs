//! C11 — retrying batch sender, used by `xgw-loadgen` only.
//!
//! The live HTTP adapters fail fast on a full ring (see `rings.rs`); this
//! sender is for bulk load tooling that would rather spend a few hundred
//! milliseconds retrying than drop records outright. Mirrors the
//! step-counter shape of the ring crate's spin/yield `Backoff`, but for an
//! async producer retrying against a ring that reports `Full`: each retry
//! waits `2^k` milliseconds, `k` the retry count, capped at `max_retries`
//! attempts before the record is dropped.

use std::time::Duration;

use tokio::time::sleep;

use xgw_ring::WireRecord;

use crate::error::AppError;
use crate::rings::SerializedProducer;

/// Outcome of a batch-sender attempt, reported back to the caller for
/// metrics/logging purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Enqueued on the first try.
    Immediate,
    /// Enqueued after `retries` backoff rounds.
    RetriedThenSucceeded { retries: u32 },
    /// Exhausted `max_retries` rounds without the ring draining.
    GaveUp,
}

/// Retries `producer.enqueue(record)` against transient `Full` outcomes,
/// sleeping `2^k` ms between attempt `k` and `k + 1`.
pub async fn send_with_backoff<R: WireRecord>(
    producer: &SerializedProducer<R>,
    record: R,
    max_retries: u32,
) -> Result<SendOutcome, AppError> {
    match producer.enqueue(record).await {
        Ok(()) => return Ok(SendOutcome::Immediate),
        Err(AppError::RingFull(_)) => {}
        Err(e) => return Err(e),
    }

    for retry in 1..=max_retries {
        sleep(Duration::from_millis(1u64 << retry)).await;
        match producer.enqueue(record).await {
            Ok(()) => return Ok(SendOutcome::RetriedThenSucceeded { retries: retry }),
            Err(AppError::RingFull(_)) => continue,
            Err(e) => return Err(e),
        }
    }

    tracing::warn!(max_retries, "batch sender gave up, ring stayed full");
    Ok(SendOutcome::GaveUp)
}
