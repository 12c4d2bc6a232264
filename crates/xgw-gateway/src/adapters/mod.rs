//! C4 — ingress adapters: validated JSON DTOs translated into wire records
//! and handed to the ring transport.

pub mod batch;
pub mod cancel;
pub mod order;
pub mod query;
