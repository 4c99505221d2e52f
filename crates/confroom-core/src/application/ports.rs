//! Port traits (interfaces) that use cases depend on.
//!
//! Adapters implement these traits; use cases never reference reqwest,
//! jsonwebtoken or a concrete room SDK.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::access::AccessClaims;
use crate::domain::identity::{PeerId, PeerMetadata, RoomId};
use crate::domain::media::StreamHandle;
use crate::domain::session::ConnectionState;
use crate::error::{RecordingError, TokenError};

// ---------------------------------------------------------------------------
// Room SDK (managed real-time service)
// ---------------------------------------------------------------------------

/// Notifications pushed by the room SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    StateChanged(ConnectionState),
    PeerJoined(PeerId),
    PeerLeft(PeerId),
    CameraStreamChanged(Option<StreamHandle>),
    ShareStreamChanged(Option<StreamHandle>),
}

/// Abstracts the managed room service: session, local media and peer list.
///
/// Every flag read through this trait is owned by the SDK; callers must not
/// cache them across an `await`.
#[async_trait]
pub trait RoomSdk: Send + Sync {
    // -- Session --

    /// Join `room_id` with `token`, returning the state the attempt ended in.
    async fn join_room(&self, room_id: &RoomId, token: &str) -> anyhow::Result<ConnectionState>;

    /// Leave the current room.
    async fn leave_room(&self) -> anyhow::Result<()>;

    /// Current connection state.
    fn state(&self) -> ConnectionState;

    /// Publish our own peer metadata.
    async fn update_metadata(&self, metadata: &PeerMetadata) -> anyhow::Result<()>;

    // -- Local camera / microphone --

    async fn enable_video(&self) -> anyhow::Result<()>;
    async fn disable_video(&self) -> anyhow::Result<()>;
    fn is_video_on(&self) -> bool;
    /// Local camera stream, present while video is on.
    fn camera_stream(&self) -> Option<StreamHandle>;

    async fn enable_audio(&self) -> anyhow::Result<()>;
    async fn disable_audio(&self) -> anyhow::Result<()>;
    fn is_audio_on(&self) -> bool;

    // -- Screen share --

    async fn start_screen_share(&self) -> anyhow::Result<()>;
    async fn stop_screen_share(&self) -> anyhow::Result<()>;
    /// Local screen-share stream, present while sharing.
    fn share_stream(&self) -> Option<StreamHandle>;

    // -- Remote peers --

    /// Ordered ids of present remote peers. Entries may be missing or blank.
    fn peer_ids(&self) -> Vec<Option<PeerId>>;

    /// Subscribe to room notifications.
    fn subscribe(&self) -> broadcast::Receiver<RoomEvent>;
}

// ---------------------------------------------------------------------------
// Peer roster (SDK-side bookkeeping)
// ---------------------------------------------------------------------------

/// Ordered list of peers currently in a room.
pub trait PeerRoster: Send + Sync {
    fn peer_ids(&self) -> Vec<Option<PeerId>>;
    fn add_peer(&self, peer_id: Option<PeerId>);
    fn remove_peer(&self, peer_id: &PeerId) -> bool;
    fn clear(&self);
}

// ---------------------------------------------------------------------------
// Rendering surfaces
// ---------------------------------------------------------------------------

/// A playback surface (a `<video>` element or native equivalent) that can
/// show one stream at a time.
pub trait MediaSurface: Send + Sync {
    /// Make `handle` the playback source of this surface.
    fn set_source(&self, handle: &StreamHandle);
}

// ---------------------------------------------------------------------------
// Recording endpoints
// ---------------------------------------------------------------------------

/// Any HTTP answer from a recording endpoint that carried a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl RecordingResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Server-side recording control.
#[async_trait]
pub trait RecordingApi: Send + Sync {
    async fn start_recording(&self, room_id: &RoomId) -> Result<RecordingResponse, RecordingError>;
    async fn stop_recording(&self, room_id: &RoomId) -> Result<RecordingResponse, RecordingError>;
}

// ---------------------------------------------------------------------------
// Access tokens
// ---------------------------------------------------------------------------

/// Signs and verifies room access tokens.
pub trait TokenSigner: Send + Sync {
    fn sign(&self, claims: &AccessClaims) -> Result<String, TokenError>;
    fn verify(&self, token: &str) -> Result<AccessClaims, TokenError>;
}

// ---------------------------------------------------------------------------
// App events (UI bridge)
// ---------------------------------------------------------------------------

/// Emits events toward the UI / logging layer.
#[async_trait]
pub trait AppEvents: Send + Sync {
    async fn emit_state_changed(&self, state: ConnectionState);
    async fn emit_peer_joined(&self, peer_id: &PeerId);
    async fn emit_peer_left(&self, peer_id: &PeerId);
    async fn emit_recording_response(
        &self,
        room_id: &RoomId,
        recording: bool,
        response: &RecordingResponse,
    );
}
