//! Error types surfaced by the session controller, the token issuer and the
//! recording client.
//!
//! Ports keep returning `anyhow::Result`; these enums are what callers match on.

use crate::domain::session::ConnectionState;

/// Errors from [`RoomSessionController`](crate::application::room_session::RoomSessionController) operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("join is only allowed while idle (state is {0})")]
    NotIdle(ConnectionState),

    #[error("display name must not be empty")]
    DisplayNameEmpty,

    #[error("room is not connected (state is {0})")]
    NotConnected(ConnectionState),

    #[error("join ended in state {0}")]
    JoinFailed(ConnectionState),

    #[error("room SDK call failed: {0:#}")]
    Sdk(anyhow::Error),

    #[error(transparent)]
    Recording(#[from] RecordingError),
}

/// Errors from the recording endpoints.
#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    /// No HTTP response at all (connection refused, timeout, bad URL).
    #[error("recording request failed: {0}")]
    Transport(String),

    /// A response arrived but its body was not JSON.
    #[error("recording response (HTTP {status}) was not JSON: {message}")]
    Body { status: u16, message: String },
}

/// Errors from minting or verifying access tokens.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TokenError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Invalid token format: {0}")]
    InvalidFormat(String),

    #[error("Token generation failed: {0}")]
    Generation(String),
}
