//! In-process [`RoomSdk`] adapter.
//!
//! Behaves like a managed room service that lives entirely in memory: joins
//! are checked against an optional token verifier, local media toggles mint
//! stream handles, and every call is recorded so a host (or a test) can see
//! exactly what was asked of the SDK.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::application::ports::{PeerRoster, RoomEvent, RoomSdk, TokenSigner};
use crate::config::DEFAULT_ACTIVE_SPEAKERS;
use crate::domain::identity::{PeerId, PeerMetadata, RoomId};
use crate::domain::media::{MediaKind, StreamHandle};
use crate::domain::session::ConnectionState;

use super::roster::InMemoryPeerRoster;

const EVENT_CAPACITY: usize = 64;

/// One call made against the loopback SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkCall {
    Join(RoomId),
    Leave,
    UpdateMetadata(PeerMetadata),
    EnableVideo,
    DisableVideo,
    EnableAudio,
    DisableAudio,
    StartScreenShare,
    StopScreenShare,
}

#[derive(Default)]
struct Inner {
    state: ConnectionState,
    room_id: Option<RoomId>,
    camera: Option<StreamHandle>,
    microphone: Option<StreamHandle>,
    share: Option<StreamHandle>,
    metadata: Option<PeerMetadata>,
    /// Most recent speaker first.
    speakers: VecDeque<PeerId>,
    next_stream_id: u64,
    reject_next_join: bool,
    fail_media: bool,
}

impl Inner {
    fn mint(&mut self, kind: MediaKind) -> StreamHandle {
        self.next_stream_id += 1;
        StreamHandle::new(self.next_stream_id, kind)
    }
}

/// Loopback room service.
pub struct LoopbackRoomSdk {
    inner: Mutex<Inner>,
    roster: Arc<dyn PeerRoster>,
    events: broadcast::Sender<RoomEvent>,
    verifier: Option<Arc<dyn TokenSigner>>,
    active_speakers_size: usize,
    calls: Mutex<Vec<SdkCall>>,
}

impl LoopbackRoomSdk {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Mutex::new(Inner::default()),
            roster: Arc::new(InMemoryPeerRoster::new()),
            events,
            verifier: None,
            active_speakers_size: DEFAULT_ACTIVE_SPEAKERS,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reject joins whose token does not verify for the requested room.
    pub fn with_token_verifier(mut self, verifier: Arc<dyn TokenSigner>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// How many recent speakers are tracked.
    pub fn with_active_speakers_size(mut self, size: usize) -> Self {
        self.active_speakers_size = size;
        self
    }

    /// Make the next join attempt end in [`ConnectionState::Failed`].
    pub fn reject_next_join(&self) {
        self.inner.lock().unwrap().reject_next_join = true;
    }

    /// Make every local media call fail until switched back.
    pub fn set_media_failure(&self, fail: bool) {
        self.inner.lock().unwrap().fail_media = fail;
    }

    /// Simulate a remote participant arriving. `None` models a peer whose
    /// id has not been assigned yet.
    pub fn add_remote_peer(&self, peer_id: Option<PeerId>) {
        self.roster.add_peer(peer_id.clone());
        if let Some(id) = peer_id {
            self.emit(RoomEvent::PeerJoined(id));
        }
    }

    pub fn remove_remote_peer(&self, peer_id: &PeerId) {
        if self.roster.remove_peer(peer_id) {
            self.inner.lock().unwrap().speakers.retain(|p| p != peer_id);
            self.emit(RoomEvent::PeerLeft(peer_id.clone()));
        }
    }

    /// Simulate audio activity from a remote participant. Unknown peers are
    /// ignored.
    pub fn peer_spoke(&self, peer_id: &PeerId) {
        if !self.roster.peer_ids().iter().flatten().any(|p| p == peer_id) {
            return;
        }
        let mut inner = self.inner.lock().unwrap();
        inner.speakers.retain(|p| p != peer_id);
        inner.speakers.push_front(peer_id.clone());
        inner.speakers.truncate(self.active_speakers_size);
    }

    /// Currently tracked speakers, most recent first.
    pub fn active_speakers(&self) -> Vec<PeerId> {
        self.inner.lock().unwrap().speakers.iter().cloned().collect()
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<SdkCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Metadata last published by the local peer.
    pub fn metadata(&self) -> Option<PeerMetadata> {
        self.inner.lock().unwrap().metadata.clone()
    }

    /// Room we are currently in.
    pub fn room_id(&self) -> Option<RoomId> {
        self.inner.lock().unwrap().room_id.clone()
    }

    fn record(&self, call: SdkCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn emit(&self, event: RoomEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn set_state(&self, state: ConnectionState) {
        self.inner.lock().unwrap().state = state;
        self.emit(RoomEvent::StateChanged(state));
    }

    /// Lock the state for a local media call, failing if not connected or
    /// if media failure was requested.
    fn media_guard(&self, op: &str) -> anyhow::Result<std::sync::MutexGuard<'_, Inner>> {
        let inner = self.inner.lock().unwrap();
        if !inner.state.is_connected() {
            anyhow::bail!("{op}: not connected (state {})", inner.state);
        }
        if inner.fail_media {
            anyhow::bail!("{op}: media device unavailable");
        }
        Ok(inner)
    }

    fn token_matches(&self, room_id: &RoomId, token: &str) -> bool {
        let Some(verifier) = &self.verifier else {
            return !token.is_empty();
        };
        match verifier.verify(token) {
            Ok(claims) if &claims.room_id == room_id => true,
            Ok(claims) => {
                warn!(expected = %room_id, actual = %claims.room_id, "Token is for another room");
                false
            }
            Err(e) => {
                warn!("Token rejected: {e}");
                false
            }
        }
    }
}

impl Default for LoopbackRoomSdk {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomSdk for LoopbackRoomSdk {
    async fn join_room(&self, room_id: &RoomId, token: &str) -> anyhow::Result<ConnectionState> {
        self.record(SdkCall::Join(room_id.clone()));

        let rejected = {
            let mut inner = self.inner.lock().unwrap();
            if !inner.state.is_idle() {
                anyhow::bail!("join_room: already {}", inner.state);
            }
            std::mem::take(&mut inner.reject_next_join)
        };

        self.set_state(ConnectionState::Connecting);

        if rejected || !self.token_matches(room_id, token) {
            info!(%room_id, "Join rejected");
            self.set_state(ConnectionState::Failed);
            // Back to the join form for another attempt.
            self.set_state(ConnectionState::Idle);
            return Ok(ConnectionState::Failed);
        }

        self.inner.lock().unwrap().room_id = Some(room_id.clone());
        self.set_state(ConnectionState::Connected);
        info!(%room_id, "Joined room");
        Ok(ConnectionState::Connected)
    }

    async fn leave_room(&self) -> anyhow::Result<()> {
        self.record(SdkCall::Leave);
        let (had_camera, had_share) = {
            let mut inner = self.inner.lock().unwrap();
            if !inner.state.is_connected() {
                anyhow::bail!("leave_room: not connected (state {})", inner.state);
            }
            inner.room_id = None;
            inner.microphone = None;
            inner.speakers.clear();
            (inner.camera.take().is_some(), inner.share.take().is_some())
        };
        self.roster.clear();
        if had_camera {
            self.emit(RoomEvent::CameraStreamChanged(None));
        }
        if had_share {
            self.emit(RoomEvent::ShareStreamChanged(None));
        }
        self.set_state(ConnectionState::Left);
        Ok(())
    }

    fn state(&self) -> ConnectionState {
        self.inner.lock().unwrap().state
    }

    async fn update_metadata(&self, metadata: &PeerMetadata) -> anyhow::Result<()> {
        self.record(SdkCall::UpdateMetadata(metadata.clone()));
        let mut inner = self.inner.lock().unwrap();
        if !inner.state.is_connected() {
            anyhow::bail!("update_metadata: not connected (state {})", inner.state);
        }
        inner.metadata = Some(metadata.clone());
        debug!(display_name = %metadata.display_name, "Metadata updated");
        Ok(())
    }

    async fn enable_video(&self) -> anyhow::Result<()> {
        self.record(SdkCall::EnableVideo);
        let handle = {
            let mut inner = self.media_guard("enable_video")?;
            if inner.camera.is_some() {
                return Ok(());
            }
            let handle = inner.mint(MediaKind::Camera);
            inner.camera = Some(handle.clone());
            handle
        };
        self.emit(RoomEvent::CameraStreamChanged(Some(handle)));
        Ok(())
    }

    async fn disable_video(&self) -> anyhow::Result<()> {
        self.record(SdkCall::DisableVideo);
        let had = {
            let mut inner = self.media_guard("disable_video")?;
            inner.camera.take().is_some()
        };
        if had {
            self.emit(RoomEvent::CameraStreamChanged(None));
        }
        Ok(())
    }

    fn is_video_on(&self) -> bool {
        self.inner.lock().unwrap().camera.is_some()
    }

    fn camera_stream(&self) -> Option<StreamHandle> {
        self.inner.lock().unwrap().camera.clone()
    }

    async fn enable_audio(&self) -> anyhow::Result<()> {
        self.record(SdkCall::EnableAudio);
        let mut inner = self.media_guard("enable_audio")?;
        if inner.microphone.is_none() {
            let handle = inner.mint(MediaKind::Microphone);
            inner.microphone = Some(handle);
        }
        Ok(())
    }

    async fn disable_audio(&self) -> anyhow::Result<()> {
        self.record(SdkCall::DisableAudio);
        let mut inner = self.media_guard("disable_audio")?;
        inner.microphone = None;
        Ok(())
    }

    fn is_audio_on(&self) -> bool {
        self.inner.lock().unwrap().microphone.is_some()
    }

    async fn start_screen_share(&self) -> anyhow::Result<()> {
        self.record(SdkCall::StartScreenShare);
        let handle = {
            let mut inner = self.media_guard("start_screen_share")?;
            if inner.share.is_some() {
                return Ok(());
            }
            let handle = inner.mint(MediaKind::Screen);
            inner.share = Some(handle.clone());
            handle
        };
        self.emit(RoomEvent::ShareStreamChanged(Some(handle)));
        Ok(())
    }

    async fn stop_screen_share(&self) -> anyhow::Result<()> {
        self.record(SdkCall::StopScreenShare);
        let had = {
            let mut inner = self.media_guard("stop_screen_share")?;
            inner.share.take().is_some()
        };
        if had {
            self.emit(RoomEvent::ShareStreamChanged(None));
        }
        Ok(())
    }

    fn share_stream(&self) -> Option<StreamHandle> {
        self.inner.lock().unwrap().share.clone()
    }

    fn peer_ids(&self) -> Vec<Option<PeerId>> {
        self.roster.peer_ids()
    }

    fn subscribe(&self) -> broadcast::Receiver<RoomEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> RoomId {
        RoomId::new("abc123")
    }

    #[tokio::test]
    async fn join_then_media_round_trip() {
        let sdk = LoopbackRoomSdk::new();
        let mut events = sdk.subscribe();

        let state = sdk.join_room(&room(), "tok").await.unwrap();
        assert_eq!(state, ConnectionState::Connected);
        assert_eq!(events.recv().await.unwrap(), RoomEvent::StateChanged(ConnectionState::Connecting));
        assert_eq!(events.recv().await.unwrap(), RoomEvent::StateChanged(ConnectionState::Connected));

        sdk.enable_video().await.unwrap();
        let handle = sdk.camera_stream().unwrap();
        assert_eq!(handle.kind, MediaKind::Camera);
        assert_eq!(
            events.recv().await.unwrap(),
            RoomEvent::CameraStreamChanged(Some(handle))
        );

        sdk.disable_video().await.unwrap();
        assert!(!sdk.is_video_on());
        assert_eq!(events.recv().await.unwrap(), RoomEvent::CameraStreamChanged(None));
    }

    #[tokio::test]
    async fn media_calls_require_connection() {
        let sdk = LoopbackRoomSdk::new();
        assert!(sdk.enable_audio().await.is_err());
        assert!(!sdk.is_audio_on());
    }

    #[tokio::test]
    async fn rejected_join_returns_to_idle() {
        let sdk = LoopbackRoomSdk::new();
        sdk.reject_next_join();
        let state = sdk.join_room(&room(), "tok").await.unwrap();
        assert_eq!(state, ConnectionState::Failed);
        assert_eq!(sdk.state(), ConnectionState::Idle);

        // The rejection is one-shot.
        let state = sdk.join_room(&room(), "tok").await.unwrap();
        assert_eq!(state, ConnectionState::Connected);
    }

    #[tokio::test]
    async fn second_join_is_refused() {
        let sdk = LoopbackRoomSdk::new();
        sdk.join_room(&room(), "tok").await.unwrap();
        assert!(sdk.join_room(&room(), "tok").await.is_err());
    }

    #[tokio::test]
    async fn leave_clears_streams_and_roster() {
        let sdk = LoopbackRoomSdk::new();
        sdk.join_room(&room(), "tok").await.unwrap();
        sdk.enable_video().await.unwrap();
        sdk.start_screen_share().await.unwrap();
        sdk.add_remote_peer(Some(PeerId::new("p1")));

        sdk.leave_room().await.unwrap();

        assert_eq!(sdk.state(), ConnectionState::Left);
        assert!(sdk.camera_stream().is_none());
        assert!(sdk.share_stream().is_none());
        assert!(sdk.peer_ids().is_empty());
        assert!(sdk.room_id().is_none());
    }

    #[tokio::test]
    async fn remote_peers_emit_notifications() {
        let sdk = LoopbackRoomSdk::new();
        let mut events = sdk.subscribe();
        sdk.add_remote_peer(None);
        sdk.add_remote_peer(Some(PeerId::new("p1")));
        sdk.remove_remote_peer(&PeerId::new("p1"));

        assert_eq!(events.recv().await.unwrap(), RoomEvent::PeerJoined(PeerId::new("p1")));
        assert_eq!(events.recv().await.unwrap(), RoomEvent::PeerLeft(PeerId::new("p1")));
        assert_eq!(sdk.peer_ids(), vec![None]);
    }

    #[test]
    fn active_speakers_are_capped_most_recent_first() {
        let sdk = LoopbackRoomSdk::new().with_active_speakers_size(2);
        for id in ["a", "b", "c"] {
            sdk.add_remote_peer(Some(PeerId::new(id)));
        }

        sdk.peer_spoke(&PeerId::new("a"));
        sdk.peer_spoke(&PeerId::new("b"));
        sdk.peer_spoke(&PeerId::new("c"));
        sdk.peer_spoke(&PeerId::new("stranger"));
        assert_eq!(sdk.active_speakers(), vec![PeerId::new("c"), PeerId::new("b")]);

        sdk.peer_spoke(&PeerId::new("b"));
        assert_eq!(sdk.active_speakers(), vec![PeerId::new("b"), PeerId::new("c")]);

        sdk.remove_remote_peer(&PeerId::new("b"));
        assert_eq!(sdk.active_speakers(), vec![PeerId::new("c")]);
    }
}
