//! In-memory [`PeerRoster`] adapter (ordered remote peer list).

use std::sync::Mutex;

use crate::application::ports::PeerRoster;
use crate::domain::identity::PeerId;

/// Simple in-memory roster that keeps join order.
pub struct InMemoryPeerRoster {
    peers: Mutex<Vec<Option<PeerId>>>,
}

impl InMemoryPeerRoster {
    pub fn new() -> Self {
        Self {
            peers: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPeerRoster {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerRoster for InMemoryPeerRoster {
    fn peer_ids(&self) -> Vec<Option<PeerId>> {
        self.peers.lock().unwrap().clone()
    }

    fn add_peer(&self, peer_id: Option<PeerId>) {
        let mut peers = self.peers.lock().unwrap();
        if let Some(id) = &peer_id {
            if peers.iter().flatten().any(|p| p == id) {
                return;
            }
        }
        peers.push(peer_id);
    }

    fn remove_peer(&self, peer_id: &PeerId) -> bool {
        let mut peers = self.peers.lock().unwrap();
        let before = peers.len();
        peers.retain(|p| p.as_ref() != Some(peer_id));
        peers.len() != before
    }

    fn clear(&self) {
        self.peers.lock().unwrap().clear();
    }
}
