//! Media stream handles owned by the room SDK.
//!
//! Pure data — the controller never looks inside a handle, it only binds it
//! to a rendering surface.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Camera,
    Microphone,
    Screen,
}

/// Non-owning reference to an SDK media stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamHandle {
    pub id: u64,
    pub kind: MediaKind,
}

impl StreamHandle {
    pub fn new(id: u64, kind: MediaKind) -> Self {
        Self { id, kind }
    }
}

/// Which local surface a stream is shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurfaceSlot {
    LocalVideo,
    ScreenShare,
}
