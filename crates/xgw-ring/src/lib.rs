//! File-backed SPSC ring buffers carrying order, cancel, and query records
//! between the gateway process and the matching/balance engine.
//!
//! This crate owns the hard part of the transport: a fixed-layout wire
//! header and record set (`record`, `header`), a memory-mapped ring
//! primitive that is wait-free on the hot path (`ring`), and a process-wide
//! registry tying the three conventional rings together (`registry`).
//!
//! # Example
//!
//! ```no_run
//! use xgw_ring::{RingPaths, RingRegistry};
//!
//! let paths = RingPaths::under("/tmp/xgw-spool");
//! RingRegistry::bootstrap(&paths)?;
//! let registry = RingRegistry::init_all(&paths)?;
//! registry.close_all();
//! # Ok::<(), xgw_ring::error::AttachError>(())
//! ```

mod boundary;
mod header;
mod invariants;
mod paths;
mod record;
mod registry;
mod ring;

pub mod error;

pub use boundary::{names, CAPACITY, MAGIC};
pub use paths::RingPaths;
pub use record::{query_type, CancelRecord, OrderRecord, QueryRecord, WireRecord, STATUS_PENDING};
pub use registry::RingRegistry;
pub use ring::{EnqueueOutcome, Ring};
