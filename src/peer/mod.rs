//! Connection adapter bridging a fragment-oriented transport and a
//! packet-oriented application.
//!
//! A [`Peer`] owns the association between one transport connection and its
//! per-connection buffer state, and exposes the packet contract the
//! application consumes: enqueue a whole outgoing packet, dequeue a whole
//! incoming packet, query availability, introspect the fragment currently
//! being delivered, and close. The inbound reassembly path and the outbound
//! drain path are sibling `impl Peer` blocks over the same state.
//!
//! Everything here is synchronous and single-threaded by contract: the
//! transport's callback dispatch serialises all access to one peer, and
//! backpressure is structural (bounded rings, one frame per writability
//! grant) rather than blocking.

mod drain;
mod reassembly;
mod state;

use std::mem;

use bytes::Bytes;
use log::{debug, warn};

use crate::{
    byte_order::{LENGTH_PREFIX_LEN, read_length_prefix, write_length_prefix},
    config::BufferConfig,
    error::{PeerError, Result},
    transport::{ConnectionId, Transport, WriteMode},
};
#[cfg(feature = "metrics")]
use crate::metrics::{self, Direction};
use state::PeerState;

/// Lifecycle phase of the adapter.
///
/// Buffer state lives inside the phase, so a live handle and its state can
/// never disagree. `Closing` keeps the previous handle so the final drain
/// and teardown callback can still find the connection, while every
/// application-facing operation already observes `NotConnected`.
#[derive(Debug)]
enum Phase {
    Disconnected,
    Connected { conn: ConnectionId, state: PeerState },
    Closing { conn: ConnectionId, state: PeerState },
}

/// Packet-oriented adapter over one transport connection.
///
/// # Examples
///
/// ```no_run
/// use sockwire::{Peer, Transport};
///
/// fn pump<T: Transport>(peer: &mut Peer<T>) -> sockwire::Result<()> {
///     peer.enqueue_packet(b"hello")?;
///     while peer.available_packet_count() > 0 {
///         let packet = peer.dequeue_packet()?;
///         println!("got {} bytes", packet.len());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Peer<T: Transport> {
    transport: T,
    config: BufferConfig,
    phase: Phase,
    write_mode: WriteMode,
}

impl<T: Transport> Peer<T> {
    /// Create a detached peer with default buffer capacities.
    #[must_use]
    pub fn new(transport: T) -> Self { Self::with_config(transport, BufferConfig::default()) }

    /// Create a detached peer with explicit buffer capacities.
    #[must_use]
    pub fn with_config(transport: T, config: BufferConfig) -> Self {
        Self {
            transport,
            config,
            phase: Phase::Disconnected,
            write_mode: WriteMode::default(),
        }
    }

    /// Bind the peer to a freshly accepted or opened connection.
    ///
    /// Called by the transport driver exactly once per connection; creates
    /// the per-connection buffers from the configured capacities.
    ///
    /// # Errors
    ///
    /// Returns [`PeerError::AlreadyAttached`] when a connection is already
    /// held, including one still draining after [`close`](Self::close).
    pub fn attach(&mut self, conn: ConnectionId) -> Result<()> {
        match &self.phase {
            Phase::Disconnected => {
                debug!("attaching peer to {conn}");
                self.phase = Phase::Connected {
                    conn,
                    state: PeerState::new(&self.config),
                };
                #[cfg(feature = "metrics")]
                metrics::inc_connections();
                Ok(())
            }
            Phase::Connected { conn: existing, .. } | Phase::Closing { conn: existing, .. } => {
                Err(PeerError::AlreadyAttached { conn: *existing })
            }
        }
    }

    /// Release the connection after the transport's final teardown callback.
    ///
    /// Discards all per-connection state. Safe to call when already
    /// detached.
    pub fn detach(&mut self) {
        if !matches!(self.phase, Phase::Disconnected) {
            debug!("detaching peer");
            self.phase = Phase::Disconnected;
            #[cfg(feature = "metrics")]
            metrics::dec_connections();
        }
    }

    /// Request connection shutdown. Idempotent.
    ///
    /// The first call marks the peer state as closing, clears the
    /// application-visible connection reference, and requests one final
    /// writability grant so the engine can drain and tear the connection
    /// down. Later calls, and calls on a detached peer, are no-ops; actual
    /// destruction stays with the transport (see [`detach`](Self::detach)).
    pub fn close(&mut self) {
        match mem::replace(&mut self.phase, Phase::Disconnected) {
            Phase::Connected { conn, mut state } => {
                debug!("close requested on {conn}");
                state.closing = true;
                self.phase = Phase::Closing { conn, state };
                self.transport.request_writable(conn);
            }
            other => self.phase = other,
        }
    }

    /// Whether a connection is attached and open to packet operations.
    #[must_use]
    pub fn is_connected(&self) -> bool { matches!(self.phase, Phase::Connected { .. }) }

    /// Whether shutdown has been requested and final teardown is pending.
    ///
    /// The transport driver consults this after the close-requested
    /// writability grant fires to decide on final teardown.
    #[must_use]
    pub fn is_closing(&self) -> bool {
        match &self.phase {
            Phase::Closing { state, .. } => state.closing,
            _ => false,
        }
    }

    /// Queue one whole packet for transmission.
    ///
    /// Frames the payload as a length-prefixed record in the outbound ring
    /// and requests a writability grant so the drain eventually runs. The
    /// write is all-or-nothing: an oversized packet is rejected outright,
    /// never clipped, and the pending count is left unchanged. Callers can
    /// size packets against [`outbound_space_left`](Self::outbound_space_left).
    ///
    /// # Errors
    ///
    /// Returns [`PeerError::NotConnected`] without a live connection, or
    /// [`PeerError::BufferFull`] when the record does not fit in the
    /// outbound ring's free space.
    pub fn enqueue_packet(&mut self, payload: &[u8]) -> Result<()> {
        let Phase::Connected { conn, state } = &mut self.phase else {
            return Err(PeerError::NotConnected);
        };
        let conn = *conn;

        let needed = LENGTH_PREFIX_LEN.saturating_add(payload.len());
        let available = state.outbound.space_left();
        if needed > available {
            return Err(PeerError::BufferFull { needed, available });
        }
        let Ok(len) = u32::try_from(payload.len()) else {
            return Err(PeerError::BufferFull { needed, available });
        };

        state.outbound.write(&write_length_prefix(len))?;
        state.outbound.write(payload)?;
        state.outbound_pending += 1;

        self.transport.request_writable(conn);
        Ok(())
    }

    /// Remove and return the oldest complete inbound packet.
    ///
    /// Mirrors the drain's truncation recovery: a record whose prefix
    /// declares more bytes than the ring holds is skipped whole, the call
    /// fails, and the next record stays readable.
    ///
    /// # Errors
    ///
    /// Returns [`PeerError::NotConnected`] without a live connection,
    /// [`PeerError::Unavailable`] when no packet is pending, or
    /// [`PeerError::Truncated`] when the stored record is shorter than its
    /// prefix declared.
    pub fn dequeue_packet(&mut self) -> Result<Bytes> {
        let Phase::Connected { state, .. } = &mut self.phase else {
            return Err(PeerError::NotConnected);
        };

        if state.inbound_pending == 0 {
            return Err(PeerError::Unavailable);
        }
        state.inbound_pending -= 1;

        let buffered = state.inbound.data_left();
        if buffered < LENGTH_PREFIX_LEN {
            state.inbound.advance_read(buffered);
            #[cfg(feature = "metrics")]
            metrics::inc_dropped(Direction::Inbound);
            return Err(PeerError::Truncated {
                declared: LENGTH_PREFIX_LEN,
                available: buffered,
            });
        }

        let declared = read_length_prefix(state.inbound.read_array::<LENGTH_PREFIX_LEN>());
        let declared = usize::try_from(declared).unwrap_or(usize::MAX);
        let available = state.inbound.data_left();
        if available < declared {
            state.inbound.advance_read(available);
            warn!("inbound record declared {declared} bytes, {available} buffered; skipping");
            #[cfg(feature = "metrics")]
            metrics::inc_dropped(Direction::Inbound);
            return Err(PeerError::Truncated { declared, available });
        }

        Ok(Bytes::from(state.inbound.read(declared)))
    }

    /// Number of complete inbound packets ready to dequeue.
    ///
    /// Returns 0 when no connection is attached; never fails.
    #[must_use]
    pub fn available_packet_count(&self) -> u32 {
        match &self.phase {
            Phase::Connected { state, .. } => state.inbound_pending,
            _ => 0,
        }
    }

    /// Number of outbound packets queued and not yet drained.
    ///
    /// Returns 0 when no connection is attached; never fails.
    #[must_use]
    pub fn queued_packet_count(&self) -> u32 {
        match &self.phase {
            Phase::Connected { state, .. } => state.outbound_pending,
            _ => 0,
        }
    }

    /// Largest payload [`enqueue_packet`](Self::enqueue_packet) currently
    /// accepts, accounting for the record's length prefix.
    ///
    /// Returns 0 when no connection is attached; never fails.
    #[must_use]
    pub fn outbound_space_left(&self) -> usize {
        match &self.phase {
            Phase::Connected { state, .. } => {
                state.outbound.space_left().saturating_sub(LENGTH_PREFIX_LEN)
            }
            _ => 0,
        }
    }

    /// Classification applied to the next drained frame.
    #[must_use]
    pub fn write_mode(&self) -> WriteMode { self.write_mode }

    /// Select how future drained frames are classified on the wire.
    ///
    /// Takes effect from the next drain; frames already handed to the
    /// transport keep their original mode.
    pub fn set_write_mode(&mut self, mode: WriteMode) { self.write_mode = mode; }

    /// Whether the fragment currently being delivered belongs to a binary
    /// frame.
    ///
    /// # Errors
    ///
    /// Returns [`PeerError::NotConnected`] without a live connection.
    pub fn is_binary_frame(&self) -> Result<bool> {
        let conn = self.connected_handle()?;
        Ok(self.transport.frame_is_binary(conn))
    }

    /// Whether the fragment currently being delivered opens its message.
    ///
    /// # Errors
    ///
    /// Returns [`PeerError::NotConnected`] without a live connection.
    pub fn is_first_fragment(&self) -> Result<bool> {
        let conn = self.connected_handle()?;
        Ok(self.transport.fragment_is_first(conn))
    }

    /// Whether the fragment currently being delivered completes its
    /// message.
    ///
    /// # Errors
    ///
    /// Returns [`PeerError::NotConnected`] without a live connection.
    pub fn is_final_fragment(&self) -> Result<bool> {
        let conn = self.connected_handle()?;
        Ok(self.transport.fragment_is_final(conn))
    }

    fn connected_handle(&self) -> Result<ConnectionId> {
        match &self.phase {
            Phase::Connected { conn, .. } => Ok(*conn),
            _ => Err(PeerError::NotConnected),
        }
    }
}

impl<T: Transport> Drop for Peer<T> {
    fn drop(&mut self) { self.close(); }
}
