//! Token issuance and verification.
//!
//! Tokens are stateless HS256 JWTs carrying `{username, exp}` with a fixed
//! one-hour validity window. Validity is purely cryptographic plus the
//! expiry check; nothing is persisted server-side.

use anyhow::Result;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token validity window (1 hour).
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    /// Standard JWT expiry (Unix timestamp, seconds).
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a token for `username`, expiring [`TOKEN_TTL_SECS`] from now.
    pub fn issue(&self, username: &str) -> Result<String> {
        let claims = Claims {
            username: username.to_string(),
            exp: Utc::now().timestamp() + TOKEN_TTL_SECS,
        };
        Ok(jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &self.encoding,
        )?)
    }

    /// Returns the username for a valid token, `None` when the token is
    /// malformed, signature-invalid, or expired. Verification failures are
    /// ordinary "not authenticated", never errors.
    pub fn verify(&self, token: &str) -> Option<String> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())
            .ok()
            .map(|data| data.claims.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret")
    }

    #[test]
    fn issued_token_verifies_to_username() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();

        assert_eq!(tokens.verify(&token).as_deref(), Some("alice"));
    }

    #[test]
    fn expired_token_fails_verification() {
        let tokens = service();
        // Encode directly with an expiry beyond the default validation leeway.
        let claims = Claims {
            username: "alice".to_string(),
            exp: Utc::now().timestamp() - 2 * TOKEN_TTL_SECS,
        };
        let token =
            jsonwebtoken::encode(&Header::default(), &claims, &tokens.encoding).unwrap();

        assert_eq!(tokens.verify(&token), None);
    }

    #[test]
    fn token_signed_with_other_secret_fails() {
        let token = TokenService::new("other-secret").issue("alice").unwrap();

        assert_eq!(service().verify(&token), None);
    }

    #[test]
    fn garbage_token_fails_verification() {
        assert_eq!(service().verify("not-a-jwt"), None);
    }
}
