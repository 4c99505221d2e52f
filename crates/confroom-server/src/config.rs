//! Server configuration, parsed once at startup from flags or the process
//! environment.

use std::net::SocketAddr;

use clap::Parser;

use confroom_core::application::issue_token::DEFAULT_TOKEN_TTL_SECS;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Room page server
///
/// Serves room pages, each carrying a freshly minted host access token.
#[derive(Parser, Clone, PartialEq)]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, default_value = DEFAULT_BIND_ADDR, env = "BIND_ADDR")]
    pub bind_addr: SocketAddr,

    /// Secret used to sign access tokens. Pages are not served without it.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Project id copied into tokens and page data
    #[arg(long, env = "PROJECT_ID")]
    pub project_id: Option<String>,

    /// Lifetime of each minted token, in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_TOKEN_TTL_SECS,
        env = "TOKEN_TTL_SECS",
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub token_ttl_secs: i64,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("project_id", &self.project_id)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = ServerConfig::try_parse_from(["confroom-server"]).unwrap();
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(cfg.token_ttl_secs, DEFAULT_TOKEN_TTL_SECS);
    }

    #[test]
    fn reads_all_values() {
        let cfg = ServerConfig::try_parse_from([
            "confroom-server",
            "--bind-addr",
            "127.0.0.1:8080",
            "--api-key",
            "secret",
            "--project-id",
            "proj",
            "--token-ttl-secs",
            "120",
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.api_key.as_deref(), Some("secret"));
        assert_eq!(cfg.project_id.as_deref(), Some("proj"));
        assert_eq!(cfg.token_ttl_secs, 120);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ServerConfig::try_parse_from(["confroom-server", "--bind-addr", "nowhere"]).is_err());
        assert!(ServerConfig::try_parse_from(["confroom-server", "--token-ttl-secs", "0"]).is_err());
        assert!(ServerConfig::try_parse_from(["confroom-server", "--token-ttl-secs=-5"]).is_err());
    }

    #[test]
    fn debug_hides_api_key() {
        let cfg = ServerConfig::try_parse_from(["confroom-server", "--api-key", "secret"]).unwrap();
        assert!(!format!("{cfg:?}").contains("secret"));
    }
}
