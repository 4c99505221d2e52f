//! Application-level context: the collaborators built once at startup and
//! handed to every room session.

use std::sync::Arc;

use crate::config::{ClientConfig, RecordingConfig};

use super::ports::{AppEvents, RecordingApi, RoomSdk};

/// Shared handles to the room SDK client and the other collaborators.
///
/// Cloning is cheap; all collaborators are behind `Arc`.
#[derive(Clone)]
pub struct AppContext {
    pub client: ClientConfig,
    /// Also decides when the recording flag flips.
    pub recording_config: RecordingConfig,
    pub sdk: Arc<dyn RoomSdk>,
    pub recording: Arc<dyn RecordingApi>,
    pub app_events: Arc<dyn AppEvents>,
}

impl AppContext {
    pub fn new(
        client: ClientConfig,
        recording_config: RecordingConfig,
        sdk: Arc<dyn RoomSdk>,
        recording: Arc<dyn RecordingApi>,
        app_events: Arc<dyn AppEvents>,
    ) -> Self {
        Self {
            client,
            recording_config,
            sdk,
            recording,
            app_events,
        }
    }
}
