//! TracingAppEvents — implements the [`AppEvents`] port by writing log records.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::application::ports::{AppEvents, RecordingResponse};
use crate::domain::identity::{PeerId, RoomId};
use crate::domain::session::ConnectionState;

/// Bridges application-layer events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAppEvents;

#[async_trait]
impl AppEvents for TracingAppEvents {
    async fn emit_state_changed(&self, state: ConnectionState) {
        info!(%state, "Room state changed");
    }

    async fn emit_peer_joined(&self, peer_id: &PeerId) {
        info!(%peer_id, "Peer joined");
    }

    async fn emit_peer_left(&self, peer_id: &PeerId) {
        info!(%peer_id, "Peer left");
    }

    async fn emit_recording_response(
        &self,
        room_id: &RoomId,
        recording: bool,
        response: &RecordingResponse,
    ) {
        if response.is_success() {
            info!(%room_id, recording, status = response.status, data = %response.body, "Recording toggled");
        } else {
            warn!(%room_id, recording, status = response.status, data = %response.body, "Recording endpoint answered with an error");
        }
    }
}
