//! Boundary conventions shared by every independently-built binary that
//! attaches to a ring file (C5). Changing any of these constants breaks
//! wire compatibility between the gateway and the engine.

/// Number of slots per ring. Must stay a power of two so `seq % CAPACITY`
/// reduces to a bitmask.
pub const CAPACITY: u64 = 65536;

/// Sentinel identifying a well-formed ring file.
pub const MAGIC: u32 = 0xDEAD_BEEF;

/// Cache line size assumed by the header's padding layout.
pub const CACHE_LINE: usize = 64;

const _: () = assert!(CAPACITY.is_power_of_two(), "CAPACITY must be a power of two");
const _: () = assert!(CAPACITY <= u32::MAX as u64, "CAPACITY must fit the on-disk u32 field");

/// Conventional (overridable) file names for the three rings, each with a
/// reserved `<name>_status` sibling that this crate never writes to.
pub mod names {
    pub const INCOMING_ORDERS: &str = "incoming_orders";
    pub const CANCEL_ORDERS: &str = "cancel_orders";
    pub const QUERIES: &str = "queries";
}
