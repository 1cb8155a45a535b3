//! Outbound path: writability-paced frame draining.

use log::warn;

use super::{Peer, Phase};
use crate::{
    byte_order::{LENGTH_PREFIX_LEN, read_length_prefix},
    error::{PeerError, Result},
    transport::Transport,
};
#[cfg(feature = "metrics")]
use crate::metrics::{self, Direction};

impl<T: Transport> Peer<T> {
    /// Drain one queued packet in response to a writability grant.
    ///
    /// Pops the oldest record from the outbound ring, transmits it as one
    /// frame tagged with the current write mode, and re-requests
    /// writability only while records remain. Sending at most one frame
    /// per grant is the flow-control contract: a slow receiver is never
    /// force-fed. Runs during shutdown too, so a closing connection can
    /// flush its queue before the engine tears it down.
    ///
    /// A record whose prefix declares more bytes than the ring holds is
    /// skipped whole; that record is lost but the ring stays aligned for
    /// the next one.
    ///
    /// # Errors
    ///
    /// Returns [`PeerError::NotConnected`] when no connection handle is
    /// held, or [`PeerError::Truncated`] when the stored record is shorter
    /// than its prefix declared.
    pub fn on_writable(&mut self) -> Result<()> {
        let (conn, state) = match &mut self.phase {
            Phase::Connected { conn, state } | Phase::Closing { conn, state } => (*conn, state),
            Phase::Disconnected => return Err(PeerError::NotConnected),
        };

        if state.outbound.data_left() == 0 || state.outbound_pending == 0 {
            return Ok(());
        }
        state.outbound_pending -= 1;

        let buffered = state.outbound.data_left();
        if buffered < LENGTH_PREFIX_LEN {
            state.outbound.advance_read(buffered);
            #[cfg(feature = "metrics")]
            metrics::inc_dropped(Direction::Outbound);
            return Err(PeerError::Truncated {
                declared: LENGTH_PREFIX_LEN,
                available: buffered,
            });
        }

        let declared = read_length_prefix(state.outbound.read_array::<LENGTH_PREFIX_LEN>());
        let declared = usize::try_from(declared).unwrap_or(usize::MAX);
        let available = state.outbound.data_left();
        if available < declared {
            state.outbound.advance_read(available);
            warn!("outbound record declared {declared} bytes, {available} buffered; skipping");
            #[cfg(feature = "metrics")]
            metrics::inc_dropped(Direction::Outbound);
            return Err(PeerError::Truncated { declared, available });
        }

        let frame = state.outbound.read(declared);
        let more = state.outbound_pending > 0;

        self.transport.send_frame(conn, &frame, self.write_mode);
        #[cfg(feature = "metrics")]
        metrics::inc_frames(Direction::Outbound);

        if more {
            // We want to write more.
            self.transport.request_writable(conn);
        }

        Ok(())
    }
}
