use std::sync::atomic::{AtomicU32, AtomicU64};

use crate::boundary::CACHE_LINE;

/// On-disk ring header, pinned byte-for-byte to §3/§6 of the wire contract.
///
/// `producer_head` is written only by the producer; `consumer_tail` only by
/// the consumer. Each counter sits on its own cache line so producer and
/// consumer never invalidate each other's line on a plain store.
#[repr(C)]
pub struct RingHeader {
    pub producer_head: AtomicU64,
    _pad1: [u8; CACHE_LINE - 8],
    pub consumer_tail: AtomicU64,
    _pad2: [u8; CACHE_LINE - 8],
    pub magic: AtomicU32,
    pub capacity: AtomicU32,
}

impl RingHeader {
    pub const SIZE: usize = std::mem::size_of::<RingHeader>();
}

const _: () = assert!(RingHeader::SIZE == 136, "ring header layout drifted from the wire contract");
const _: () = assert!(2 * CACHE_LINE == 128, "magic must sit at byte offset 128");
