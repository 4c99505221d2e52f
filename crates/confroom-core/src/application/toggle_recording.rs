//! ToggleRecording use case.
//!
//! Picks the stop endpoint while recording and the start endpoint otherwise,
//! reports the JSON answer, and decides whether the local flag flips
//! according to [`RecordingFlipPolicy`].

use std::sync::Arc;

use tracing::warn;

use crate::config::RecordingFlipPolicy;
use crate::domain::identity::RoomId;
use crate::error::SessionError;

use super::ports::{AppEvents, RecordingApi};

pub struct ToggleRecordingUseCase {
    recording: Arc<dyn RecordingApi>,
    app_events: Arc<dyn AppEvents>,
    policy: RecordingFlipPolicy,
}

impl ToggleRecordingUseCase {
    pub fn new(
        recording: Arc<dyn RecordingApi>,
        app_events: Arc<dyn AppEvents>,
        policy: RecordingFlipPolicy,
    ) -> Self {
        Self {
            recording,
            app_events,
            policy,
        }
    }

    /// Toggle recording for `room_id` given the flag value at call time.
    /// Returns the new flag value.
    ///
    /// A request that never got a response (or whose body was not JSON)
    /// leaves the flag untouched and returns the error.
    pub async fn execute(&self, room_id: &RoomId, is_recording: bool) -> Result<bool, SessionError> {
        let response = if is_recording {
            self.recording.stop_recording(room_id).await
        } else {
            self.recording.start_recording(room_id).await
        }
        .map_err(|e| {
            warn!(%room_id, is_recording, "Recording request failed: {e}");
            SessionError::from(e)
        })?;

        let flip = match self.policy {
            RecordingFlipPolicy::Unconditional => true,
            RecordingFlipPolicy::ConfirmedOnly => response.is_success(),
        };
        let next = if flip { !is_recording } else { is_recording };

        self.app_events
            .emit_recording_response(room_id, next, &response)
            .await;
        Ok(next)
    }
}
