//! Shared fixtures for integration tests.

use std::{cell::RefCell, num::NonZeroUsize, rc::Rc};

use sockwire::{BufferConfig, ConnectionId, Peer, Transport, WriteMode};

/// Connection identifier shared by the integration flows.
pub const CONN: ConnectionId = ConnectionId::new(1);

#[derive(Debug, Default)]
struct Shared {
    sent: Vec<(ConnectionId, Vec<u8>, WriteMode)>,
    writable_requests: Vec<ConnectionId>,
    binary: bool,
    first: bool,
    final_fragment: bool,
}

/// Scriptable stand-in for the WebSocket engine.
///
/// Clones share one ledger, so a test can keep a handle for inspection
/// after moving the transport into a [`Peer`].
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    shared: Rc<RefCell<Shared>>,
}

impl MockTransport {
    /// Script the engine's facts about the fragment being delivered.
    pub fn set_fragment_facts(&self, binary: bool, first: bool, final_fragment: bool) {
        let mut shared = self.shared.borrow_mut();
        shared.binary = binary;
        shared.first = first;
        shared.final_fragment = final_fragment;
    }

    /// Frames handed to the engine so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<(ConnectionId, Vec<u8>, WriteMode)> {
        self.shared.borrow().sent.clone()
    }

    /// Number of frames handed to the engine so far.
    #[must_use]
    pub fn sent_count(&self) -> usize { self.shared.borrow().sent.len() }

    /// Number of writability callbacks requested so far.
    #[must_use]
    pub fn writable_request_count(&self) -> usize {
        self.shared.borrow().writable_requests.len()
    }
}

impl Transport for MockTransport {
    fn send_frame(&mut self, conn: ConnectionId, payload: &[u8], mode: WriteMode) {
        self.shared.borrow_mut().sent.push((conn, payload.to_vec(), mode));
    }

    fn request_writable(&mut self, conn: ConnectionId) {
        self.shared.borrow_mut().writable_requests.push(conn);
    }

    fn frame_is_binary(&self, _conn: ConnectionId) -> bool { self.shared.borrow().binary }

    fn fragment_is_first(&self, _conn: ConnectionId) -> bool { self.shared.borrow().first }

    fn fragment_is_final(&self, _conn: ConnectionId) -> bool { self.shared.borrow().final_fragment }
}

/// Attach a peer with default capacities to [`CONN`], delivering final
/// binary fragments unless a test rescripts the facts.
#[must_use]
pub fn connected_peer() -> (Peer<MockTransport>, MockTransport) {
    connected_peer_with_config(BufferConfig::default())
}

/// Attach a peer with explicit capacities to [`CONN`].
#[must_use]
pub fn connected_peer_with_config(config: BufferConfig) -> (Peer<MockTransport>, MockTransport) {
    let transport = MockTransport::default();
    transport.set_fragment_facts(true, true, true);
    let mut peer = Peer::with_config(transport.clone(), config);
    peer.attach(CONN).expect("attach fresh peer");
    (peer, transport)
}

/// Build a [`BufferConfig`] from plain capacities.
#[must_use]
pub fn config(inbound: usize, outbound: usize, staging: usize) -> BufferConfig {
    BufferConfig {
        inbound_capacity: NonZeroUsize::new(inbound).expect("non-zero"),
        outbound_capacity: NonZeroUsize::new(outbound).expect("non-zero"),
        staging_capacity: NonZeroUsize::new(staging).expect("non-zero"),
    }
}

/// Drain every queued frame from `sender` and deliver each to `receiver`
/// as a single final fragment, returning the number of frames moved.
pub fn pump_wire(
    sender: &mut Peer<MockTransport>,
    sender_transport: &MockTransport,
    receiver: &mut Peer<MockTransport>,
) -> usize {
    let mut moved = 0;
    while sender.queued_packet_count() > 0 {
        sender.on_writable().expect("drain sender");
        let (_, payload, _) = sender_transport
            .sent()
            .last()
            .cloned()
            .expect("frame recorded");
        receiver
            .on_fragment_received(&payload)
            .expect("deliver frame");
        moved += 1;
    }
    moved
}
