//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use confroom_core::error::TokenError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("could not issue access token: {0}")]
    Token(#[from] TokenError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::EmptyRoomId => StatusCode::BAD_REQUEST,
            AppError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!(%status, "Request failed: {}", self);
        (status, self.to_string()).into_response()
    }
}
