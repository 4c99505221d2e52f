//! Connection lifecycle and local media flags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Room connection state as reported by the room SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Idle,
    Connecting,
    Connected,
    /// The last join attempt was rejected.
    Failed,
    /// We left the room (or were removed from it).
    Left,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Failed => "failed",
            Self::Left => "left",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the local media toggles.
///
/// `video_on`, `audio_on` and `screen_sharing` mirror the SDK; `recording`
/// is owned by the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFlags {
    pub video_on: bool,
    pub audio_on: bool,
    pub screen_sharing: bool,
    pub recording: bool,
}
