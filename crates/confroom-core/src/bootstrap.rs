//! Composition root — builds the [`AppContext`] once from configuration.

use std::sync::Arc;

use tracing::info;

use crate::adapters::recording::http::HttpRecordingClient;
use crate::adapters::sdk::loopback::LoopbackRoomSdk;
use crate::application::app_context::AppContext;
use crate::application::ports::{AppEvents, RecordingApi, RoomSdk};
use crate::config::{ClientConfig, RecordingConfig};
use crate::error::RecordingError;

/// Build the room SDK client and the recording client, then wrap them with
/// `app_events` into one context shared by every room session.
pub fn build_app_context(
    client: ClientConfig,
    recording_config: RecordingConfig,
    app_events: Arc<dyn AppEvents>,
) -> Result<AppContext, RecordingError> {
    let sdk: Arc<dyn RoomSdk> =
        Arc::new(LoopbackRoomSdk::new().with_active_speakers_size(client.active_speakers_size));
    let recording: Arc<dyn RecordingApi> = Arc::new(HttpRecordingClient::new(&recording_config)?);

    info!(
        project_id = %client.project_id,
        active_speakers = client.active_speakers_size,
        recording_base = %recording_config.base_url,
        flip_policy = ?recording_config.flip_policy,
        "Room client ready"
    );

    Ok(AppContext::new(client, recording_config, sdk, recording, app_events))
}
