//! C1 — record layouts.
//!
//! These types are structurally frozen: field order is pinned exactly as
//! listed below, `#[repr(C)]` forbids the compiler from reordering fields,
//! and each type carries a compile-time size assertion so a mismatched
//! consumer binary fails to build rather than silently misreading bytes.
//! None of them may embed an owning reference or pointer — `WireRecord` is
//! only implemented for plain scalar aggregates.

use std::mem::size_of;

/// Marker for types that may be stored directly in ring slots: `Copy`,
/// `Send`, `'static`, and free of any indirection. Implemented only for the
/// three record kinds below — sealed by being a private supertrait bound
/// satisfied solely inside this module.
///
/// # Safety
/// Implementors must be `#[repr(C)]`, contain no padding that is read
/// before being written, and contain no pointers/references.
pub unsafe trait WireRecord: Copy + Send + 'static {}

/// A new-order intent (§3 "Order record").
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_id: u64,
    pub price: u64,
    pub timestamp: u64,
    pub user_id: u64,
    pub shares_qty: u32,
    pub symbol: u32,
    pub side: u8,
    pub order_type: u8,
    pub status: u8,
}

/// Status byte the gateway stamps on every order before enqueue: pending.
pub const STATUS_PENDING: u8 = b'O';

unsafe impl WireRecord for OrderRecord {}

const _: () = assert!(size_of::<OrderRecord>() == 48, "OrderRecord layout drifted");

/// A cancel request (§3 "Cancel record").
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelRecord {
    pub order_id: u64,
    pub user_id: u64,
    pub symbol: u32,
}

unsafe impl WireRecord for CancelRecord {}

const _: () = assert!(size_of::<CancelRecord>() == 24, "CancelRecord layout drifted");

/// An account query: balance, holdings, or add-user-on-login (§3 "Query record").
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryRecord {
    pub query_id: u64,
    pub user_id: u64,
    pub query_type: u8,
}

/// `query_type` values.
pub mod query_type {
    pub const GET_BALANCE: u8 = 0;
    pub const GET_HOLDINGS: u8 = 1;
    pub const ADD_USER_ON_LOGIN: u8 = 2;
}

unsafe impl WireRecord for QueryRecord {}

const _: () = assert!(size_of::<QueryRecord>() == 24, "QueryRecord layout drifted");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_hard_coded_wire_constants() {
        assert_eq!(size_of::<OrderRecord>(), 48);
        assert_eq!(size_of::<CancelRecord>(), 24);
        assert_eq!(size_of::<QueryRecord>(), 24);
    }
}
