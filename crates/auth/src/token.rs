//! HS256 session tokens.
//!
//! Tokens are stateless: there is no server-side session store, and therefore
//! no revocation before natural expiry. Acceptable for this system's
//! low-stakes domain.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::Claims;

/// Absolute token lifetime: one hour from issuance.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// HS256 requires at least 256 bits of key material.
const MIN_KEY_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing key shorter than 256 bits. Raised at construction time and
    /// treated as fatal configuration by the binary.
    #[error("signing key must be at least {MIN_KEY_BYTES} bytes for HS256, got {0}")]
    WeakKey(usize),

    /// Malformed structure, bad signature, or undecodable claims.
    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Verification seam used by the HTTP middleware.
pub trait TokenVerifier: Send + Sync {
    /// Decode and verify signature + expiry, returning the claims.
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// Issues and verifies HS256-signed session tokens with a symmetric key.
pub struct Hs256TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for Hs256TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hs256TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl Hs256TokenService {
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_KEY_BYTES {
            return Err(TokenError::WeakKey(secret.len()));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::seconds(TOKEN_TTL_SECS),
        })
    }

    /// Issue a token for `subject`, valid from now until now + TTL.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }

    /// True only for a well-formed, correctly signed, unexpired token.
    /// Never errors; any failure is `false`.
    pub fn validate(&self, token: &str) -> bool {
        match self.decode(token, true) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("token validation failed: {e}");
                false
            }
        }
    }

    /// Subject claim of a structurally valid, correctly signed token.
    ///
    /// Expiry is deliberately not checked here; callers wanting a liveness
    /// check must also call [`Hs256TokenService::validate`].
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        Ok(self.decode(token, false)?.sub)
    }

    fn decode(&self, token: &str, check_expiry: bool) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = check_expiry;
        if !check_expiry {
            validation.required_spec_claims.clear();
        }

        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

impl TokenVerifier for Hs256TokenService {
    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode(token, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"unit-test-signing-key-0123456789abcdef";

    fn service() -> Hs256TokenService {
        Hs256TokenService::new(SECRET).unwrap()
    }

    fn encode_raw(secret: &[u8], claims: &Claims) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    #[test]
    fn short_key_is_rejected_at_construction() {
        let err = Hs256TokenService::new(b"too-short").unwrap_err();
        assert!(matches!(err, TokenError::WeakKey(9)));
    }

    #[test]
    fn issue_then_validate_round_trips() {
        let svc = service();
        let token = svc.issue("pharmacist").unwrap();
        assert!(svc.validate(&token));
        assert_eq!(svc.extract_subject(&token).unwrap(), "pharmacist");
    }

    #[test]
    fn expired_token_fails_validate_but_still_yields_subject() {
        let svc = service();
        let now = Utc::now();
        let token = encode_raw(
            SECRET,
            &Claims {
                sub: "pharmacist".to_string(),
                iat: (now - Duration::hours(2)).timestamp(),
                exp: (now - Duration::hours(1)).timestamp(),
            },
        );
        assert!(!svc.validate(&token));
        // extract_subject ignores expiry.
        assert_eq!(svc.extract_subject(&token).unwrap(), "pharmacist");
    }

    #[test]
    fn token_signed_with_a_different_key_is_rejected() {
        let svc = service();
        let now = Utc::now();
        let token = encode_raw(
            b"another-signing-key-0123456789abcdef!!",
            &Claims {
                sub: "pharmacist".to_string(),
                iat: now.timestamp(),
                exp: (now + Duration::hours(1)).timestamp(),
            },
        );
        assert!(!svc.validate(&token));
        assert!(svc.extract_subject(&token).is_err());
    }

    #[test]
    fn garbage_never_panics_validate() {
        let svc = service();
        assert!(!svc.validate(""));
        assert!(!svc.validate("not.a.token"));
        assert!(svc.extract_subject("not.a.token").is_err());
    }
}
