//! Per-connection buffer and bookkeeping state.

use crate::{config::BufferConfig, ring::RingBuffer};

/// Buffers and counters owned by one attached connection.
///
/// The pending counts are the sole availability signal for complete
/// records; consumers never infer availability from raw buffer occupancy.
/// Each count equals the number of length-prefixed records present in its
/// ring at any observation point.
#[derive(Debug)]
pub(super) struct PeerState {
    /// Reassembled packets awaiting the application.
    pub(super) inbound: RingBuffer,
    /// Framed packets awaiting transmission.
    pub(super) outbound: RingBuffer,
    /// Complete records currently in `inbound`.
    pub(super) inbound_pending: u32,
    /// Complete records currently in `outbound`.
    pub(super) outbound_pending: u32,
    /// Staging area for the one inbound message being reassembled.
    pub(super) staging: Box<[u8]>,
    /// Bytes already staged for the in-progress message.
    pub(super) staged: usize,
    /// Set once by `close()`; asks the engine to finalise the connection
    /// after the drain completes.
    pub(super) closing: bool,
}

impl PeerState {
    pub(super) fn new(config: &BufferConfig) -> Self {
        Self {
            inbound: RingBuffer::with_capacity(config.inbound_capacity),
            outbound: RingBuffer::with_capacity(config.outbound_capacity),
            inbound_pending: 0,
            outbound_pending: 0,
            staging: vec![0; config.staging_capacity.get()].into_boxed_slice(),
            staged: 0,
            closing: false,
        }
    }
}
