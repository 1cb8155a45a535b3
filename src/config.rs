//! Buffer sizing configuration for peer connections.

use std::num::NonZeroUsize;

/// Default capacity for each ring buffer and the staging area (64 KiB).
pub const DEFAULT_BUFFER_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64 * 1024) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

/// Settings that bound a connection's buffer memory.
///
/// All three capacities are fixed for the connection's lifetime; together
/// they cap the adapter's per-connection footprint and provide the
/// structural backpressure the drain scheduler relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferConfig {
    /// Capacity of the inbound ring holding reassembled packets awaiting
    /// the application.
    pub inbound_capacity: NonZeroUsize,
    /// Capacity of the outbound ring holding packets awaiting
    /// transmission.
    pub outbound_capacity: NonZeroUsize,
    /// Capacity of the staging area that accumulates one in-progress
    /// inbound message. Bounds the largest message the peer can
    /// reassemble.
    pub staging_capacity: NonZeroUsize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            inbound_capacity: DEFAULT_BUFFER_CAPACITY,
            outbound_capacity: DEFAULT_BUFFER_CAPACITY,
            staging_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}
