//! Debug-only assertion macros for ring buffer invariants.
//!
//! Zero cost in release builds (`#[cfg(debug_assertions)]`). Naming follows
//! the wire header: `producer_head` / `consumer_tail`.

/// `producer_head - consumer_tail` must never exceed capacity.
macro_rules! debug_assert_bounded_count {
    ($count:expr, $capacity:expr) => {
        debug_assert!(
            $count <= $capacity,
            "count {} exceeds capacity {}",
            $count,
            $capacity
        )
    };
}

/// The consumer may never advance its tail past the producer's head.
macro_rules! debug_assert_tail_not_past_head {
    ($new_tail:expr, $head:expr) => {
        debug_assert!(
            $new_tail <= $head,
            "advancing consumer_tail {} beyond producer_head {}",
            $new_tail,
            $head
        )
    };
}

/// Sequence counters only move forward.
macro_rules! debug_assert_monotonic {
    ($name:literal, $old:expr, $new:expr) => {
        debug_assert!($new >= $old, "{} decreased from {} to {}", $name, $old, $new)
    };
}

/// Detects an accidental counter jump that looks like u64 wraparound. At
/// real traffic rates genuine wraparound takes decades; a jump this large
/// almost always means a bug.
macro_rules! debug_assert_no_wrap {
    ($name:literal, $old:expr, $new:expr) => {
        debug_assert!(
            $new > $old || $old.wrapping_sub($new) > (1u64 << 32),
            "{} potential wrap: {} -> {}",
            $name,
            $old,
            $new
        )
    };
}

pub(crate) use debug_assert_bounded_count;
pub(crate) use debug_assert_monotonic;
pub(crate) use debug_assert_no_wrap;
pub(crate) use debug_assert_tail_not_past_head;
