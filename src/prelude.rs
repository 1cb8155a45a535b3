//! Optional convenience imports for common `sockwire` workflows.
//!
//! This module is intentionally small and focused on high-frequency types.
//! Prefer importing specialised APIs directly from their owning modules.

pub use crate::{
    config::BufferConfig,
    error::{PeerError, Result},
    peer::Peer,
    transport::{ConnectionId, Transport, WriteMode},
};
