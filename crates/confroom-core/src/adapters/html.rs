//! HTML rendering of view models.
//!
//! Produces markup fragments for [`RoomView`] and [`LocalMessageBubble`].
//! Every piece of user-supplied text goes through [`escape`].

use std::fmt::Write as _;

use crate::application::view::{
    ControlAction, ControlButton, Icon, LocalMessageBubble, RoomView,
};

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_message_bubble(bubble: &LocalMessageBubble) -> String {
    format!(
        r#"<div class="bubble bubble-local"><span class="bubble-text">{}</span></div>"#,
        escape(bubble.visible_text())
    )
}

fn icon_name(icon: Icon) -> &'static str {
    match icon {
        Icon::Video => "video",
        Icon::VideoSlash => "video-slash",
        Icon::Microphone => "microphone",
        Icon::MicrophoneSlash => "microphone-slash",
        Icon::Desktop => "desktop",
        Icon::Circle => "circle",
        Icon::StopCircle => "stop-circle",
    }
}

fn action_name(action: ControlAction) -> &'static str {
    match action {
        ControlAction::ToggleVideo => "toggle-video",
        ControlAction::ToggleAudio => "toggle-audio",
        ControlAction::ToggleScreenShare => "toggle-screen-share",
        ControlAction::ToggleRecording => "toggle-recording",
    }
}

fn render_button(out: &mut String, button: &ControlButton) {
    let _ = write!(
        out,
        r#"<button type="button" data-action="{}"><i class="icon icon-{}"></i></button>"#,
        action_name(button.action),
        icon_name(button.icon)
    );
}

fn disabled(flag: bool) -> &'static str {
    if flag {
        ""
    } else {
        " disabled"
    }
}

pub fn render_room_view(view: &RoomView) -> String {
    let mut out = String::new();

    let _ = write!(out, r#"<p class="status" data-state="{0}">{0}</p>"#, view.status);

    if let Some(form) = &view.join_form {
        let _ = write!(
            out,
            r#"<form class="join"><input name="displayName" type="text" placeholder="Display Name" value="{}"{}><button type="submit" data-action="join"{}>Join Room</button></form>"#,
            escape(&form.display_name),
            disabled(form.input_enabled),
            disabled(form.join_enabled),
        );
    }

    if let Some(controls) = &view.controls {
        out.push_str(r#"<div class="controls">"#);
        for button in &controls.buttons {
            render_button(&mut out, button);
        }
        out.push_str("</div>");
    }

    out.push_str(r#"<div class="local-tiles">"#);
    if view.local_video_tile {
        out.push_str(r#"<video data-surface="localVideo" autoplay muted></video>"#);
    }
    if view.screen_share_tile {
        out.push_str(r#"<video data-surface="screenShare" autoplay muted></video>"#);
    }
    out.push_str("</div>");

    out.push_str(r#"<div class="remote-peers">"#);
    for tile in &view.remote_peers {
        let _ = write!(
            out,
            r#"<div class="remote-peer" data-peer-id="{}"></div>"#,
            escape(tile.peer_id.as_str())
        );
    }
    out.push_str("</div>");

    if view.chat_panel {
        out.push_str(r#"<aside class="chat-box"></aside>"#);
    }

    out
}
