//! RoomSessionController — the page-level controller for one room.
//!
//! Owns the display name and the recording flag, reads everything else from
//! the room SDK, keeps the local-video and screen-share surfaces bound to the
//! current stream handles, and builds the [`RoomView`] for each phase.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::domain::identity::{DisplayName, RoomId};
use crate::domain::media::SurfaceSlot;
use crate::domain::session::{ConnectionState, MediaFlags};
use crate::error::SessionError;

use super::app_context::AppContext;
use super::join_room::JoinRoomUseCase;
use super::ports::{AppEvents, MediaSurface, RoomEvent, RoomSdk};
use super::stream_binding::StreamBinding;
use super::toggle_media::ToggleMediaUseCase;
use super::toggle_recording::ToggleRecordingUseCase;
use super::view::{build_room_view, RoomView, ViewInput};

pub struct RoomSessionController {
    room_id: RoomId,
    token: String,
    display_name: String,
    is_recording: bool,
    sdk: Arc<dyn RoomSdk>,
    app_events: Arc<dyn AppEvents>,
    join_room: JoinRoomUseCase,
    toggle_media: ToggleMediaUseCase,
    toggle_recording: ToggleRecordingUseCase,
    local_video: StreamBinding,
    screen_share: StreamBinding,
    events: broadcast::Receiver<RoomEvent>,
}

impl RoomSessionController {
    /// Set up a controller for `room_id` with the token the page was served with.
    pub fn new(ctx: &AppContext, room_id: RoomId, token: String) -> Self {
        Self {
            room_id,
            token,
            display_name: String::new(),
            is_recording: false,
            sdk: ctx.sdk.clone(),
            app_events: ctx.app_events.clone(),
            join_room: JoinRoomUseCase::new(ctx.sdk.clone()),
            toggle_media: ToggleMediaUseCase::new(ctx.sdk.clone()),
            toggle_recording: ToggleRecordingUseCase::new(
                ctx.recording.clone(),
                ctx.app_events.clone(),
                ctx.recording_config.flip_policy,
            ),
            local_video: StreamBinding::new(SurfaceSlot::LocalVideo),
            screen_share: StreamBinding::new(SurfaceSlot::ScreenShare),
            events: ctx.sdk.subscribe(),
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn state(&self) -> ConnectionState {
        self.sdk.state()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Edit the display name. Ignored (returns false) unless idle.
    pub fn set_display_name(&mut self, name: impl Into<String>) -> bool {
        if !self.state().is_idle() {
            return false;
        }
        self.display_name = name.into();
        true
    }

    /// Whether the join button is actionable right now.
    pub fn can_join(&self) -> bool {
        self.state().is_idle() && DisplayName::parse(&self.display_name).is_some()
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    pub fn flags(&self) -> MediaFlags {
        MediaFlags {
            video_on: self.sdk.is_video_on(),
            audio_on: self.sdk.is_audio_on(),
            screen_sharing: self.sdk.share_stream().is_some(),
            recording: self.is_recording,
        }
    }

    // -- Actions --

    /// Join the room with the current display name.
    pub async fn join(&mut self) -> Result<ConnectionState, SessionError> {
        let result = self
            .join_room
            .execute(&self.room_id, &self.token, &self.display_name)
            .await;
        self.sync_streams();
        result
    }

    /// Leave the room.
    pub async fn leave(&mut self) -> Result<(), SessionError> {
        self.ensure_connected()?;
        self.sdk.leave_room().await.map_err(SessionError::Sdk)?;
        info!(room_id = %self.room_id, "Left room");
        self.sync_streams();
        Ok(())
    }

    pub async fn toggle_video(&mut self) -> Result<bool, SessionError> {
        let result = self.toggle_media.toggle_video().await;
        self.sync_streams();
        result
    }

    pub async fn toggle_audio(&mut self) -> Result<bool, SessionError> {
        self.toggle_media.toggle_audio().await
    }

    pub async fn toggle_screen_share(&mut self) -> Result<bool, SessionError> {
        let result = self.toggle_media.toggle_screen_share().await;
        self.sync_streams();
        result
    }

    /// Start or stop server-side recording depending on the current flag.
    pub async fn toggle_recording(&mut self) -> Result<bool, SessionError> {
        self.ensure_connected()?;
        let next = self
            .toggle_recording
            .execute(&self.room_id, self.is_recording)
            .await?;
        self.is_recording = next;
        Ok(next)
    }

    // -- Surfaces --

    /// A rendering surface for `slot` was mounted (`Some`) or unmounted (`None`).
    /// Returns true if a stream was attached to it.
    pub fn mount_surface(&mut self, slot: SurfaceSlot, surface: Option<Arc<dyn MediaSurface>>) -> bool {
        match slot {
            SurfaceSlot::LocalVideo => self.local_video.set_surface(surface),
            SurfaceSlot::ScreenShare => self.screen_share.set_surface(surface),
        }
    }

    /// Re-read both stream handles from the SDK and attach whatever changed.
    pub fn sync_streams(&mut self) {
        self.local_video.set_handle(self.sdk.camera_stream());
        self.screen_share.set_handle(self.sdk.share_stream());
    }

    // -- SDK notifications --

    /// Handle every notification already queued. Returns how many were handled.
    pub async fn pump_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.handle_event(event).await;
                    handled += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Missed room events, resyncing streams");
                    self.sync_streams();
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return handled,
            }
        }
    }

    /// Wait for the next notification and handle it. Returns false once the
    /// SDK has dropped its event channel.
    pub async fn next_event(&mut self) -> bool {
        loop {
            match self.events.recv().await {
                Ok(event) => {
                    self.handle_event(event).await;
                    return true;
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Missed room events, resyncing streams");
                    self.sync_streams();
                }
                Err(RecvError::Closed) => return false,
            }
        }
    }

    async fn handle_event(&mut self, event: RoomEvent) {
        match event {
            RoomEvent::StateChanged(state) => {
                self.app_events.emit_state_changed(state).await;
            }
            RoomEvent::PeerJoined(peer_id) => {
                self.app_events.emit_peer_joined(&peer_id).await;
            }
            RoomEvent::PeerLeft(peer_id) => {
                self.app_events.emit_peer_left(&peer_id).await;
            }
            // Queued payloads can be stale by the time they are pumped; bind
            // whatever the SDK holds now.
            RoomEvent::CameraStreamChanged(_) | RoomEvent::ShareStreamChanged(_) => {
                self.sync_streams();
            }
        }
    }

    // -- View --

    pub fn view(&self) -> RoomView {
        let view = build_room_view(&ViewInput {
            state: self.state(),
            display_name: self.display_name.clone(),
            flags: self.flags(),
            peer_ids: self.sdk.peer_ids(),
        });
        debug!(status = %view.status, peers = view.remote_peers.len(), "Built room view");
        view
    }

    fn ensure_connected(&self) -> Result<(), SessionError> {
        let state = self.state();
        if state.is_connected() {
            Ok(())
        } else {
            Err(SessionError::NotConnected(state))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::adapters::sdk::loopback::{LoopbackRoomSdk, SdkCall};
    use crate::adapters::surface::VideoSurface;
    use crate::application::ports::{RecordingApi, RecordingResponse};
    use crate::config::{ClientConfig, RecordingConfig, RecordingFlipPolicy};
    use crate::domain::identity::{PeerId, PeerMetadata};
    use crate::error::RecordingError;

    #[derive(Default)]
    struct FakeRecording {
        hits: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl RecordingApi for FakeRecording {
        async fn start_recording(&self, _room_id: &RoomId) -> Result<RecordingResponse, RecordingError> {
            self.hits.lock().unwrap().push("start");
            Ok(RecordingResponse { status: 200, body: json!({ "ok": true }) })
        }

        async fn stop_recording(&self, _room_id: &RoomId) -> Result<RecordingResponse, RecordingError> {
            self.hits.lock().unwrap().push("stop");
            Ok(RecordingResponse { status: 200, body: json!({ "ok": true }) })
        }
    }

    /// Answers every call with an error status and a JSON body.
    struct FailingRecording;

    #[async_trait]
    impl RecordingApi for FailingRecording {
        async fn start_recording(&self, _room_id: &RoomId) -> Result<RecordingResponse, RecordingError> {
            Ok(RecordingResponse { status: 500, body: json!({ "error": "boom" }) })
        }

        async fn stop_recording(&self, _room_id: &RoomId) -> Result<RecordingResponse, RecordingError> {
            Ok(RecordingResponse { status: 500, body: json!({ "error": "boom" }) })
        }
    }

    /// Collects what the controller reports upward.
    #[derive(Default)]
    struct CollectingEvents {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AppEvents for CollectingEvents {
        async fn emit_state_changed(&self, state: ConnectionState) {
            self.seen.lock().unwrap().push(format!("state:{state}"));
        }

        async fn emit_peer_joined(&self, peer_id: &PeerId) {
            self.seen.lock().unwrap().push(format!("joined:{peer_id}"));
        }

        async fn emit_peer_left(&self, peer_id: &PeerId) {
            self.seen.lock().unwrap().push(format!("left:{peer_id}"));
        }

        async fn emit_recording_response(&self, _room_id: &RoomId, recording: bool, _response: &RecordingResponse) {
            self.seen.lock().unwrap().push(format!("recording:{recording}"));
        }
    }

    struct Harness {
        sdk: Arc<LoopbackRoomSdk>,
        recording: Arc<FakeRecording>,
        events: Arc<CollectingEvents>,
        controller: RoomSessionController,
    }

    fn harness() -> Harness {
        let sdk = Arc::new(LoopbackRoomSdk::new());
        let recording = Arc::new(FakeRecording::default());
        let events = Arc::new(CollectingEvents::default());
        let ctx = AppContext::new(
            ClientConfig::new("test-project"),
            RecordingConfig::new("http://localhost"),
            sdk.clone(),
            recording.clone(),
            events.clone(),
        );
        let controller = RoomSessionController::new(&ctx, RoomId::new("abc123"), "tok".into());
        Harness {
            sdk,
            recording,
            events,
            controller,
        }
    }

    async fn joined() -> Harness {
        let mut h = harness();
        h.controller.set_display_name("Ada");
        h.controller.join().await.unwrap();
        h
    }

    #[tokio::test]
    async fn join_is_gated_on_name_and_state() {
        let mut h = harness();
        assert!(!h.controller.can_join());
        assert!(matches!(h.controller.join().await, Err(SessionError::DisplayNameEmpty)));

        h.controller.set_display_name("Ada");
        assert!(h.controller.can_join());
        assert_eq!(h.controller.join().await.unwrap(), ConnectionState::Connected);

        assert!(!h.controller.can_join());
        assert!(matches!(
            h.controller.join().await,
            Err(SessionError::NotIdle(ConnectionState::Connected))
        ));
        let joins = h.sdk.calls().iter().filter(|c| matches!(c, SdkCall::Join(_))).count();
        assert_eq!(joins, 1);
    }

    #[tokio::test]
    async fn display_name_frozen_after_join() {
        let mut h = joined().await;
        assert!(!h.controller.set_display_name("Grace"));
        assert_eq!(h.controller.display_name(), "Ada");
        assert_eq!(
            h.sdk.metadata(),
            Some(PeerMetadata {
                display_name: "Ada".into()
            })
        );
    }

    #[tokio::test]
    async fn failed_join_keeps_join_form() {
        let mut h = harness();
        h.sdk.reject_next_join();
        h.controller.set_display_name("Ada");

        assert!(matches!(h.controller.join().await, Err(SessionError::JoinFailed(_))));
        let view = h.controller.view();
        assert!(view.join_form.is_some());
        assert!(view.controls.is_none());
    }

    #[tokio::test]
    async fn video_surface_follows_camera_stream() {
        let mut h = joined().await;
        let surface = Arc::new(VideoSurface::new());
        h.controller.mount_surface(SurfaceSlot::LocalVideo, Some(surface.clone()));

        assert!(h.controller.toggle_video().await.unwrap());
        assert_eq!(surface.source(), h.sdk.camera_stream());
        assert!(h.controller.view().local_video_tile);

        // The event for the same handle must not rebind.
        h.controller.pump_events().await;
        assert_eq!(surface.bind_count(), 1);

        assert!(!h.controller.toggle_video().await.unwrap());
        assert!(!h.controller.view().local_video_tile);
    }

    #[tokio::test]
    async fn ended_camera_stream_is_not_rebound_by_queued_events() {
        let mut h = joined().await;
        let surface = Arc::new(VideoSurface::new());
        h.controller.mount_surface(SurfaceSlot::LocalVideo, Some(surface.clone()));

        h.controller.toggle_video().await.unwrap();
        h.controller.toggle_video().await.unwrap();
        assert!(h.sdk.camera_stream().is_none());

        // Both the "on" and the "off" notification are still queued.
        h.controller.pump_events().await;
        assert_eq!(surface.bind_count(), 1);

        // A fresh camera stream is bound once more.
        h.controller.toggle_video().await.unwrap();
        h.controller.pump_events().await;
        assert_eq!(surface.bind_count(), 2);
        assert_eq!(surface.source(), h.sdk.camera_stream());
    }

    #[tokio::test]
    async fn confirmed_only_policy_from_recording_config() {
        let sdk = Arc::new(LoopbackRoomSdk::new());
        let ctx = AppContext::new(
            ClientConfig::new("test-project"),
            RecordingConfig::new("http://localhost").with_flip_policy(RecordingFlipPolicy::ConfirmedOnly),
            sdk.clone(),
            Arc::new(FailingRecording),
            Arc::new(CollectingEvents::default()),
        );
        let mut controller = RoomSessionController::new(&ctx, RoomId::new("abc123"), "tok".into());
        controller.set_display_name("Ada");
        controller.join().await.unwrap();

        assert!(!controller.toggle_recording().await.unwrap());
        assert!(!controller.is_recording());
    }

    #[tokio::test]
    async fn screen_surface_mounted_late_still_binds() {
        let mut h = joined().await;
        assert!(h.controller.toggle_screen_share().await.unwrap());

        let surface = Arc::new(VideoSurface::new());
        assert!(h.controller.mount_surface(SurfaceSlot::ScreenShare, Some(surface.clone())));
        assert_eq!(surface.source(), h.sdk.share_stream());
    }

    #[tokio::test]
    async fn recording_round_trip() {
        let mut h = joined().await;

        assert!(h.controller.toggle_recording().await.unwrap());
        assert!(h.controller.is_recording());
        assert!(!h.controller.toggle_recording().await.unwrap());
        assert!(!h.controller.is_recording());
        assert_eq!(*h.recording.hits.lock().unwrap(), vec!["start", "stop"]);
    }

    #[tokio::test]
    async fn controls_need_a_connection() {
        let mut h = harness();
        assert!(matches!(
            h.controller.toggle_recording().await,
            Err(SessionError::NotConnected(ConnectionState::Idle))
        ));
        assert!(h.recording.hits.lock().unwrap().is_empty());
        assert!(h.controller.view().controls.is_none());
    }

    #[tokio::test]
    async fn peer_notifications_are_reported_and_rendered() {
        let mut h = joined().await;
        h.sdk.add_remote_peer(Some(PeerId::new("p1")));
        h.sdk.add_remote_peer(None);
        h.sdk.add_remote_peer(Some(PeerId::new("p2")));
        h.sdk.remove_remote_peer(&PeerId::new("p1"));

        h.controller.pump_events().await;

        let seen = h.events.seen.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                "state:connecting",
                "state:connected",
                "joined:p1",
                "joined:p2",
                "left:p1",
            ]
        );
        let tiles: Vec<_> = h.controller.view().remote_peers.into_iter().map(|t| t.peer_id).collect();
        assert_eq!(tiles, vec![PeerId::new("p2")]);
    }

    #[tokio::test]
    async fn leave_moves_to_left_and_hides_controls() {
        let mut h = joined().await;
        h.controller.toggle_video().await.unwrap();

        h.controller.leave().await.unwrap();

        let view = h.controller.view();
        assert_eq!(view.status, ConnectionState::Left);
        assert!(view.controls.is_none());
        assert!(!view.chat_panel);
        assert!(!view.local_video_tile);
    }
}
