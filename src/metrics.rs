//! Metric helpers for `sockwire`.
//!
//! This module defines metric names and simple helper functions wrapping
//! the [`metrics`](https://docs.rs/metrics) crate. It is compiled only with
//! the default-on `metrics` feature.

use metrics::{counter, gauge};

/// Name of the gauge tracking attached connections.
pub const CONNECTIONS_ACTIVE: &str = "sockwire_connections_active";
/// Name of the counter tracking committed and transmitted frames.
pub const FRAMES_PROCESSED: &str = "sockwire_frames_processed_total";
/// Name of the counter tracking messages and records dropped whole.
pub const PACKETS_DROPPED: &str = "sockwire_packets_dropped_total";

/// Direction of frame processing.
#[derive(Clone, Copy)]
pub enum Direction {
    /// Inbound messages committed for the application.
    Inbound,
    /// Outbound frames handed to the transport.
    Outbound,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

/// Increment the attached connections gauge.
pub fn inc_connections() { gauge!(CONNECTIONS_ACTIVE).increment(1.0); }

/// Decrement the attached connections gauge.
pub fn dec_connections() { gauge!(CONNECTIONS_ACTIVE).decrement(1.0); }

/// Record a committed or transmitted frame for the given direction.
pub fn inc_frames(direction: Direction) {
    counter!(FRAMES_PROCESSED, "direction" => direction.as_str()).increment(1);
}

/// Record a message or record dropped whole for the given direction.
pub fn inc_dropped(direction: Direction) {
    counter!(PACKETS_DROPPED, "direction" => direction.as_str()).increment(1);
}
