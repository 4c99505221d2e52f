pub mod app_context;
pub mod issue_token;
pub mod join_room;
pub mod ports;
pub mod room_session;
pub mod stream_binding;
pub mod toggle_media;
pub mod toggle_recording;
pub mod view;
