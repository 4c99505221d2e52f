//! HS256 JWT implementation of the [`TokenSigner`] port.
//!
//! Tokens are signed with the server-held API key and verified with the same
//! key; there is no key rotation.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::application::ports::TokenSigner;
use crate::domain::access::AccessClaims;
use crate::error::TokenError;

/// Signs and verifies room access tokens with a shared secret.
pub struct JwtTokenSigner {
    secret: String,
}

impl JwtTokenSigner {
    /// Create a signer for `api_key`. An empty key is treated as missing.
    pub fn new(api_key: impl Into<String>) -> Result<Self, TokenError> {
        let secret = api_key.into();
        if secret.trim().is_empty() {
            return Err(TokenError::MissingApiKey);
        }
        Ok(Self { secret })
    }
}

impl std::fmt::Debug for JwtTokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JwtTokenSigner(***)")
    }
}

impl TokenSigner for JwtTokenSigner {
    fn sign(&self, claims: &AccessClaims) -> Result<String, TokenError> {
        let key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), claims, &key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens expire at exactly `exp`.
        validation.leeway = 0;

        let data = decode::<AccessClaims>(token, &key, &validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::InvalidFormat(e.to_string()),
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::{Permissions, Role};
    use crate::domain::identity::RoomId;

    const TEST_KEY: &str = "test-api-key-for-unit-tests";

    #[test]
    fn host_token_round_trips() {
        let signer = JwtTokenSigner::new(TEST_KEY).unwrap();
        let claims = AccessClaims::host(RoomId::new("abc123"), 3600).with_project_id("proj");

        let token = signer.sign(&claims).unwrap();
        assert!(!token.is_empty());

        let decoded = signer.verify(&token).unwrap();
        assert_eq!(decoded, claims);
        assert_eq!(decoded.role, Role::Host);
        assert_eq!(decoded.permissions, Permissions::host());
    }

    #[test]
    fn empty_key_is_missing() {
        assert_eq!(JwtTokenSigner::new("").unwrap_err(), TokenError::MissingApiKey);
        assert_eq!(JwtTokenSigner::new("  ").unwrap_err(), TokenError::MissingApiKey);
    }

    #[test]
    fn wrong_key_fails_signature_check() {
        let signer = JwtTokenSigner::new(TEST_KEY).unwrap();
        let other = JwtTokenSigner::new("another-key").unwrap();

        let token = signer.sign(&AccessClaims::host(RoomId::new("r"), 3600)).unwrap();
        assert_eq!(other.verify(&token).unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn expired_token_is_rejected() {
        let signer = JwtTokenSigner::new(TEST_KEY).unwrap();
        let mut claims = AccessClaims::host(RoomId::new("r"), 3600);
        claims.exp = claims.iat - 10;

        let token = signer.sign(&claims).unwrap();
        assert_eq!(signer.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn garbage_is_invalid_format() {
        let signer = JwtTokenSigner::new(TEST_KEY).unwrap();
        match signer.verify("not-a-valid-jwt") {
            Err(TokenError::InvalidFormat(_)) => {}
            other => panic!("Expected InvalidFormat, got {other:?}"),
        }
    }
}
