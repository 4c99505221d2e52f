//! Pure view construction for the room page.
//!
//! Builds a [`RoomView`] from a snapshot of controller state. No I/O and no
//! surface attachment happens here; see `stream_binding` for that.

use serde::Serialize;

use crate::domain::chat::ChatMessage;
use crate::domain::identity::{DisplayName, PeerId};
use crate::domain::session::{ConnectionState, MediaFlags};

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Icon shown on a control button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Icon {
    Video,
    VideoSlash,
    Microphone,
    MicrophoneSlash,
    Desktop,
    Circle,
    StopCircle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlAction {
    ToggleVideo,
    ToggleAudio,
    ToggleScreenShare,
    ToggleRecording,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlButton {
    pub action: ControlAction,
    pub icon: Icon,
}

/// Live controls, only present while connected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlBar {
    pub buttons: [ControlButton; 4],
}

/// Display name input + join button, only present while idle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinForm {
    pub display_name: String,
    pub input_enabled: bool,
    pub join_enabled: bool,
}

/// Placeholder for one remote participant. What it renders is up to the
/// RemotePeer component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePeerTile {
    pub peer_id: PeerId,
}

/// Everything the room page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub status: ConnectionState,
    pub join_form: Option<JoinForm>,
    pub controls: Option<ControlBar>,
    pub local_video_tile: bool,
    pub screen_share_tile: bool,
    pub remote_peers: Vec<RemotePeerTile>,
    pub chat_panel: bool,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Snapshot the view is built from.
#[derive(Debug, Clone, Default)]
pub struct ViewInput {
    pub state: ConnectionState,
    pub display_name: String,
    pub flags: MediaFlags,
    pub peer_ids: Vec<Option<PeerId>>,
}

pub fn build_room_view(input: &ViewInput) -> RoomView {
    let state = input.state;

    let join_form = state.is_idle().then(|| JoinForm {
        display_name: input.display_name.clone(),
        input_enabled: state.is_idle(),
        join_enabled: DisplayName::parse(&input.display_name).is_some(),
    });

    let controls = state.is_connected().then(|| control_bar(&input.flags));

    RoomView {
        status: state,
        join_form,
        controls,
        local_video_tile: input.flags.video_on,
        screen_share_tile: input.flags.screen_sharing,
        remote_peers: visible_peer_ids(&input.peer_ids)
            .into_iter()
            .map(|peer_id| RemotePeerTile { peer_id })
            .collect(),
        chat_panel: state.is_connected(),
    }
}

fn control_bar(flags: &MediaFlags) -> ControlBar {
    let pick = |on: bool, when_on: Icon, when_off: Icon| if on { when_on } else { when_off };
    ControlBar {
        buttons: [
            ControlButton {
                action: ControlAction::ToggleVideo,
                icon: pick(flags.video_on, Icon::VideoSlash, Icon::Video),
            },
            ControlButton {
                action: ControlAction::ToggleAudio,
                icon: pick(flags.audio_on, Icon::MicrophoneSlash, Icon::Microphone),
            },
            ControlButton {
                action: ControlAction::ToggleScreenShare,
                icon: pick(flags.screen_sharing, Icon::Desktop, Icon::Circle),
            },
            ControlButton {
                action: ControlAction::ToggleRecording,
                icon: pick(flags.recording, Icon::StopCircle, Icon::Circle),
            },
        ],
    }
}

/// Ids that get a RemotePeer tile: present and non-blank, in SDK order.
pub fn visible_peer_ids(ids: &[Option<PeerId>]) -> Vec<PeerId> {
    ids.iter()
        .flatten()
        .filter(|id| !id.is_blank())
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Chat bubble
// ---------------------------------------------------------------------------

/// One outgoing chat message, drawn right-aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalMessageBubble {
    pub text: String,
}

impl LocalMessageBubble {
    /// A missing message renders as an empty bubble.
    pub fn new(message: Option<&ChatMessage>) -> Self {
        Self {
            text: message.map(|m| m.text.clone()).unwrap_or_default(),
        }
    }

    pub fn visible_text(&self) -> &str {
        &self.text
    }
}
