//! IssueToken use case — mints a host access token for one room.

use std::sync::Arc;

use tracing::info;

use crate::domain::access::AccessClaims;
use crate::domain::identity::RoomId;
use crate::error::TokenError;

use super::ports::TokenSigner;

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Builds host claims for a room and signs them. Nothing is cached: every
/// call produces a new token.
pub struct IssueTokenUseCase {
    signer: Arc<dyn TokenSigner>,
    ttl_seconds: i64,
    project_id: Option<String>,
}

impl IssueTokenUseCase {
    pub fn new(signer: Arc<dyn TokenSigner>) -> Self {
        Self {
            signer,
            ttl_seconds: DEFAULT_TOKEN_TTL_SECS,
            project_id: None,
        }
    }

    pub fn with_ttl_seconds(mut self, ttl_seconds: i64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    pub fn with_project_id(mut self, project_id: Option<String>) -> Self {
        self.project_id = project_id;
        self
    }

    pub fn execute(&self, room_id: &RoomId) -> Result<String, TokenError> {
        let mut claims = AccessClaims::host(room_id.clone(), self.ttl_seconds);
        if let Some(project_id) = &self.project_id {
            claims = claims.with_project_id(project_id.clone());
        }
        let token = self.signer.sign(&claims)?;
        info!(%room_id, role = ?claims.role, exp = claims.exp, "Issued access token");
        Ok(token)
    }
}
