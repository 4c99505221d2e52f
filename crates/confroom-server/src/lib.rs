//! confroom-server — serves room pages with a per-request host access token.

pub mod config;
pub mod error;
pub mod page;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::redirect_to_new_room))
        .route("/new", get(routes::redirect_to_new_room))
        .route("/room/:room_id", get(routes::serve_room))
        .route("/healthz", get(routes::healthz))
        .with_state(state)
}
