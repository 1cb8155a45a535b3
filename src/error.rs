//! Error types for the framing adapter.
//!
//! Every failure is a synchronous return value; nothing panics across the
//! transport or application boundary and the adapter never retries on its
//! own behalf.

use thiserror::Error;

use crate::{ring::InsufficientSpace, transport::ConnectionId};

/// Errors surfaced by [`Peer`](crate::peer::Peer) operations.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum PeerError {
    /// An operation was attempted while no transport connection is held.
    #[error("no live transport connection")]
    NotConnected,

    /// A second attach was attempted while a connection is already held.
    #[error("peer already attached to connection {conn}")]
    AlreadyAttached {
        /// Connection the peer is currently bound to.
        conn: ConnectionId,
    },

    /// No complete packet is queued for the application.
    #[error("no complete packet available")]
    Unavailable,

    /// A fragment or packet could not be stored without overflowing a
    /// bounded buffer. The offending message is dropped whole, never
    /// partially stored.
    #[error("buffer full: {needed} bytes needed, {available} free")]
    BufferFull {
        /// Bytes the operation needed to store.
        needed: usize,
        /// Free bytes available when the operation ran.
        available: usize,
    },

    /// A stored length prefix claimed more bytes than the buffer holds.
    /// The remainder of the record is skipped so later records stay
    /// aligned; only this one call fails.
    #[error("record truncated: {declared} bytes declared, {available} buffered")]
    Truncated {
        /// Bytes the record's prefix declared.
        declared: usize,
        /// Bytes actually buffered behind the prefix.
        available: usize,
    },
}

impl From<InsufficientSpace> for PeerError {
    fn from(err: InsufficientSpace) -> Self {
        PeerError::BufferFull {
            needed: err.requested,
            available: err.available,
        }
    }
}

/// Result type used throughout the peer adapter API.
pub type Result<T> = std::result::Result<T, PeerError>;
