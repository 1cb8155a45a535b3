#![doc(html_root_url = "https://docs.rs/sockwire/latest")]
//! Public API for the `sockwire` library.
//!
//! This crate bridges a fragment-oriented WebSocket engine and a
//! packet-oriented application: inbound fragments are reassembled into
//! whole length-delimited packets, and outbound packets are framed and
//! drained onto the wire one frame per writability grant, through bounded
//! per-connection ring buffers.

pub mod byte_order;
pub mod config;
pub mod error;
/// Result type alias re-exported for convenience when working with the
/// peer adapter.
pub use error::Result;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod peer;
pub mod prelude;
pub mod ring;
pub mod transport;

pub use config::{BufferConfig, DEFAULT_BUFFER_CAPACITY};
pub use error::PeerError;
#[cfg(feature = "metrics")]
pub use metrics::{CONNECTIONS_ACTIVE, Direction, FRAMES_PROCESSED, PACKETS_DROPPED};
pub use peer::Peer;
pub use ring::{InsufficientSpace, RingBuffer};
pub use transport::{ConnectionId, Transport, WriteMode};
