//! Session token signing and verification.
//!
//! Tokens are HS256 JWTs whose payload is the user ID plus the standard
//! issued-at and expiry claims. They are signed, not encrypted.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// ID of the authenticated user.
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Issued at (Unix timestamp).
    pub iat: u64,
    /// Expiration (Unix timestamp).
    pub exp: u64,
}

/// Token-related errors.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Signing failed.
    #[error("failed to sign token: {0}")]
    Sign(String),

    /// Bad signature, malformed token, or expired.
    #[error("invalid or expired token")]
    Invalid,
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct SessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_secs: u64,
}

impl SessionTokens {
    /// Create a signer from a secret and a token lifetime in seconds.
    pub fn new(secret: &str, expiration_secs: u64) -> Self {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiration_secs,
        }
    }

    /// Token lifetime in seconds.
    pub fn expiration_secs(&self) -> u64 {
        self.expiration_secs
    }

    /// Sign a token for the given user.
    pub fn sign(&self, user_id: i64) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let exp = now.checked_add(self.expiration_secs).ok_or_else(|| {
            TokenError::Sign(format!(
                "expiration of {} seconds is out of range",
                self.expiration_secs
            ))
        })?;
        let payload = TokenPayload {
            user_id,
            iat: now,
            exp,
        };

        encode(&Header::default(), &payload, &self.encoding_key)
            .map_err(|e| TokenError::Sign(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its payload.
    pub fn verify(&self, token: &str) -> Result<TokenPayload, TokenError> {
        decode::<TokenPayload>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Session token rejected: {}", e);
                TokenError::Invalid
            })
    }
}

impl std::fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokens")
            .field("expiration_secs", &self.expiration_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let tokens = SessionTokens::new("test-secret", 3600);

        let token = tokens.sign(42).unwrap();
        let payload = tokens.verify(&token).unwrap();

        assert_eq!(payload.user_id, 42);
        assert_eq!(payload.exp - payload.iat, 3600);
    }

    #[test]
    fn test_payload_uses_user_id_claim_name() {
        let payload = TokenPayload {
            user_id: 5,
            iat: 1,
            exp: 2,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["userId"], 5);
    }

    #[test]
    fn test_sign_overflowing_expiration() {
        let tokens = SessionTokens::new("test-secret", u64::MAX);
        assert!(matches!(tokens.sign(1), Err(TokenError::Sign(_))));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = SessionTokens::new("secret1", 3600).sign(1).unwrap();
        let result = SessionTokens::new("secret2", 3600).verify(&token);
        assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = SessionTokens::new("test-secret", 3600);
        let now = chrono::Utc::now().timestamp() as u64;
        let stale = TokenPayload {
            user_id: 1,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(tokens.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_garbage_rejected() {
        let tokens = SessionTokens::new("test-secret", 3600);
        assert!(tokens.verify("not.a.token").is_err());
        assert!(tokens.verify("").is_err());
    }

    #[test]
    fn test_debug_hides_keys() {
        let debug = format!("{:?}", SessionTokens::new("super-secret", 60));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("60"));
    }
}
