//! Room page shell: the idle view pre-rendered plus the initial page data.

use serde::Serialize;

use confroom_core::adapters::html::{escape, render_room_view};
use confroom_core::application::view::{build_room_view, ViewInput};
use confroom_core::domain::identity::RoomId;

/// Data handed to the page at render time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<'a> {
    pub room_id: &'a RoomId,
    pub token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<&'a str>,
}

/// JSON that is safe to drop inside a `<script>` element.
fn script_json(data: &PageData<'_>) -> String {
    serde_json::to_string(data)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

pub fn render_room_page(data: &PageData<'_>) -> String {
    let view = build_room_view(&ViewInput::default());
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Room {title}</title>
</head>
<body>
<main id="room">{body}</main>
<script id="__ROOM_DATA__" type="application/json">{data}</script>
</body>
</html>
"#,
        title = escape(data.room_id.as_str()),
        body = render_room_view(&view),
        data = script_json(data),
    )
}
