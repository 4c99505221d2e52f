//! Shared router state — built once at startup.

use std::sync::Arc;

use tracing::warn;

use confroom_core::adapters::token::jwt::JwtTokenSigner;
use confroom_core::application::issue_token::IssueTokenUseCase;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// `None` when no API key is configured; every page request then fails.
    pub token_issuer: Option<Arc<IssueTokenUseCase>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let token_issuer = match config.api_key.as_deref().map(JwtTokenSigner::new) {
            Some(Ok(signer)) => Some(Arc::new(
                IssueTokenUseCase::new(Arc::new(signer))
                    .with_ttl_seconds(config.token_ttl_secs)
                    .with_project_id(config.project_id.clone()),
            )),
            Some(Err(e)) => {
                warn!("Token signing disabled: {e}");
                None
            }
            None => {
                warn!("API_KEY is not set; room pages will not be served");
                None
            }
        };

        Self {
            config: Arc::new(config),
            token_issuer,
        }
    }
}
