//! Access roles, permission bundles and token claims.
//!
//! Pure data. Signing lives in `adapters::token`.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::identity::RoomId;

/// Room role granted by an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Host,
    CoHost,
    Speaker,
    Listener,
    Guest,
}

/// Media sources a peer is allowed to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProduceSources {
    pub cam: bool,
    pub mic: bool,
    pub screen: bool,
}

/// Permission bundle embedded in the access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub admin: bool,
    pub can_consume: bool,
    pub can_produce: bool,
    pub can_produce_sources: ProduceSources,
    pub can_recv_data: bool,
    pub can_send_data: bool,
    pub can_update_metadata: bool,
}

impl Permissions {
    /// Everything on: administrative rights, all media in and out, data
    /// channels, own metadata.
    pub fn host() -> Self {
        Self {
            admin: true,
            can_consume: true,
            can_produce: true,
            can_produce_sources: ProduceSources {
                cam: true,
                mic: true,
                screen: true,
            },
            can_recv_data: true,
            can_send_data: true,
            can_update_metadata: true,
        }
    }
}

/// Claims carried by a room access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub room_id: RoomId,
    pub role: Role,
    pub permissions: Permissions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Issued-at (Unix seconds).
    pub iat: i64,
    /// Expiration (Unix seconds).
    pub exp: i64,
    /// Per-token nonce so two tokens for the same room never collide.
    pub jti: String,
}

impl AccessClaims {
    /// Host claims for `room_id`, valid for `ttl_seconds` from now.
    pub fn host(room_id: RoomId, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(Duration::seconds(ttl_seconds))
            .unwrap_or(now)
            .timestamp();

        Self {
            room_id,
            role: Role::Host,
            permissions: Permissions::host(),
            project_id: None,
            iat: now.timestamp(),
            exp,
            jti: format!("{:016x}", rand::random::<u64>()),
        }
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}
