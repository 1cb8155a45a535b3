//! Transport boundary consumed by the framing adapter.
//!
//! The adapter never parses WebSocket frames itself. An external engine
//! owns connection establishment, protocol parsing, and the event loop; it
//! surfaces fragment boundaries, binary/text classification, and
//! writability as primitive facts through this trait, and accepts whole
//! frames back for transmission. All calls are synchronous and are
//! serialised by the engine's callback dispatch.

/// Identifier assigned by the transport to one live connection.
///
/// The adapter holds the identifier non-owningly: it never controls the
/// connection's lifetime and validates nothing itself; the transport is
/// the authority on which identifiers are live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Create a new [`ConnectionId`] with the provided value.
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Return the inner `u64` representation.
    #[must_use]
    pub const fn as_u64(self) -> u64 { self.0 }
}

impl From<u64> for ConnectionId {
    fn from(value: u64) -> Self { Self(value) }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConnectionId({})", self.0)
    }
}

/// Classification applied to the next drained frame.
///
/// Per-connection and mutable at any time; changing the mode never
/// reclassifies frames already handed to the transport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Frames are sent as WebSocket text.
    Text,
    /// Frames are sent as WebSocket binary (the default).
    #[default]
    Binary,
}

/// Primitive operations and per-fragment facts exposed by the engine.
///
/// The three fact accessors describe the fragment *currently being
/// delivered* to [`Peer::on_fragment_received`](crate::peer::Peer::on_fragment_received);
/// their value outside that delivery is whatever the engine last reported.
pub trait Transport {
    /// Transmit one complete frame on `conn`, tagged with `mode`.
    fn send_frame(&mut self, conn: ConnectionId, payload: &[u8], mode: WriteMode);

    /// Ask the engine for one future writability callback on `conn`.
    fn request_writable(&mut self, conn: ConnectionId);

    /// Whether the current fragment belongs to a binary frame.
    fn frame_is_binary(&self, conn: ConnectionId) -> bool;

    /// Whether the current fragment opens its message.
    fn fragment_is_first(&self, conn: ConnectionId) -> bool;

    /// Whether the current fragment completes its message.
    fn fragment_is_final(&self, conn: ConnectionId) -> bool;
}
