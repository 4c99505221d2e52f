//! HTTP handlers.

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use tracing::info;
use uuid::Uuid;

use confroom_core::domain::identity::RoomId;
use confroom_core::error::TokenError;

use crate::error::AppError;
use crate::page::{render_room_page, PageData};
use crate::state::AppState;

/// Serve the room page with a freshly minted host token.
pub async fn serve_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Html<String>, AppError> {
    if room_id.trim().is_empty() {
        return Err(AppError::EmptyRoomId);
    }
    let room_id = RoomId::new(room_id);

    let issuer = state.token_issuer.as_ref().ok_or(TokenError::MissingApiKey)?;
    let token = issuer.execute(&room_id)?;
    info!(%room_id, "Serving room page");

    Ok(Html(render_room_page(&PageData {
        room_id: &room_id,
        token: &token,
        project_id: state.config.project_id.as_deref(),
    })))
}

/// Send the visitor to a brand-new room.
pub async fn redirect_to_new_room() -> Redirect {
    let new_id = Uuid::new_v4().to_string();
    Redirect::to(&format!("/room/{new_id}"))
}

pub async fn healthz() -> &'static str {
    "ok"
}
