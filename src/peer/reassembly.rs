//! Inbound path: fragment staging and whole-message commit.

use log::warn;

use super::{Peer, Phase};
use crate::{
    byte_order::{LENGTH_PREFIX_LEN, write_length_prefix},
    error::{PeerError, Result},
    transport::Transport,
};
#[cfg(feature = "metrics")]
use crate::metrics::{self, Direction};

impl<T: Transport> Peer<T> {
    /// Accept one fragment delivered by the transport.
    ///
    /// Fragments accumulate in the fixed staging area until the transport
    /// reports the final fragment of the message, at which point the whole
    /// message is committed into the inbound ring as one length-prefixed
    /// record and becomes visible to
    /// [`dequeue_packet`](Self::dequeue_packet). A partially assembled
    /// message is never observable by the application: staging lives
    /// outside the shared ring and only the complete message crosses into
    /// it.
    ///
    /// Overflow is fatal for the in-progress message on either side: a
    /// fragment that would overrun the staging area, or a completed
    /// message the inbound ring cannot hold, drops the whole message and
    /// resets staging so the next message starts clean.
    ///
    /// # Errors
    ///
    /// Returns [`PeerError::NotConnected`] without a live connection, or
    /// [`PeerError::BufferFull`] when the staging area or the inbound ring
    /// cannot take the message.
    pub fn on_fragment_received(&mut self, payload: &[u8]) -> Result<()> {
        let Phase::Connected { conn, state } = &mut self.phase else {
            return Err(PeerError::NotConnected);
        };
        let conn = *conn;

        let staging_capacity = state.staging.len();
        let needed = state.staged.saturating_add(payload.len());
        if needed > staging_capacity {
            state.staged = 0;
            warn!("staging overflow on {conn}: {needed} bytes > {staging_capacity}; message dropped");
            #[cfg(feature = "metrics")]
            metrics::inc_dropped(Direction::Inbound);
            return Err(PeerError::BufferFull {
                needed,
                available: staging_capacity,
            });
        }

        state.staging[state.staged..state.staged + payload.len()].copy_from_slice(payload);
        state.staged += payload.len();

        if !self.transport.fragment_is_final(conn) {
            return Ok(());
        }

        let needed = LENGTH_PREFIX_LEN + state.staged;
        let available = state.inbound.space_left();
        if needed > available {
            state.staged = 0;
            warn!("inbound ring full on {conn}: {needed} bytes > {available} free; message dropped");
            #[cfg(feature = "metrics")]
            metrics::inc_dropped(Direction::Inbound);
            return Err(PeerError::BufferFull { needed, available });
        }
        let Ok(len) = u32::try_from(state.staged) else {
            state.staged = 0;
            return Err(PeerError::BufferFull { needed, available });
        };

        state.inbound.write(&write_length_prefix(len))?;
        state.inbound.write(&state.staging[..state.staged])?;
        state.inbound_pending += 1;
        state.staged = 0;
        #[cfg(feature = "metrics")]
        metrics::inc_frames(Direction::Inbound);

        Ok(())
    }
}
