//! JoinRoom use case.
//!
//! Asks the SDK to join with the page's token and, once connected, publishes
//! the display name as peer metadata.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::identity::{DisplayName, PeerMetadata, RoomId};
use crate::domain::session::ConnectionState;
use crate::error::SessionError;

use super::ports::RoomSdk;

/// Orchestrates joining a room.
pub struct JoinRoomUseCase {
    sdk: Arc<dyn RoomSdk>,
}

impl JoinRoomUseCase {
    pub fn new(sdk: Arc<dyn RoomSdk>) -> Self {
        Self { sdk }
    }

    /// Execute the join flow.
    ///
    /// 1. Refuse unless the room is idle and the name is non-blank.
    /// 2. Ask the SDK to join with `token`.
    /// 3. On `connected`, send exactly one metadata update carrying `display_name`.
    ///
    /// No retry is attempted when the SDK rejects the join.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        token: &str,
        display_name: &str,
    ) -> Result<ConnectionState, SessionError> {
        // --- 1. Preconditions ---
        let state = self.sdk.state();
        if !state.is_idle() {
            return Err(SessionError::NotIdle(state));
        }
        let name = DisplayName::parse(display_name).ok_or(SessionError::DisplayNameEmpty)?;

        // --- 2. Join ---
        let outcome = self
            .sdk
            .join_room(room_id, token)
            .await
            .map_err(SessionError::Sdk)?;

        if !outcome.is_connected() {
            warn!(%room_id, state = %outcome, "Join did not connect");
            return Err(SessionError::JoinFailed(outcome));
        }
        info!(%room_id, display_name = %name, "Joined room");

        // --- 3. Publish metadata ---
        self.sdk
            .update_metadata(&PeerMetadata::from(&name))
            .await
            .map_err(SessionError::Sdk)?;

        Ok(outcome)
    }
}
