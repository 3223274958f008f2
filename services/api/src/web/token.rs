//! services/api/src/web/token.rs
//!
//! Issues and verifies the signed bearer tokens that prove a caller's
//! identity. Tokens are stateless: validity is fully determined by the
//! HS256 signature and the expiry claim, nothing is persisted.

use chrono::{Duration, Utc};
use contract_review_core::domain::{Identity, User};
use contract_review_core::ports::{PortError, PortResult};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in every token issued by the server.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user id, as the standard subject claim.
    pub sub: String,
    pub email: String,
    /// Issued-at (Unix timestamp, seconds).
    pub iat: usize,
    /// Expiry (Unix timestamp, seconds).
    pub exp: usize,
}

/// Mints and verifies bearer tokens with a secret injected from config.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Produces a signed token embedding the user's id and email.
    pub fn issue(&self, user: &User) -> PortResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }

    /// Resolves a token back to the identity it encodes. Fails when the
    /// token is malformed, forged, or expired.
    pub fn verify(&self, token: &str) -> PortResult<Identity> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| PortError::InvalidCredential(e.to_string()))?;
        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|e| PortError::InvalidCredential(e.to_string()))?;
        Ok(Identity {
            user_id,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issue_then_verify_resolves_the_same_user() {
        let issuer = TokenIssuer::new("test-secret", 30);
        let user = sample_user();
        let token = issuer.issue(&user).unwrap();
        let identity = issuer.verify(&token).unwrap();
        assert_eq!(identity.user_id, user.id);
        assert_eq!(identity.email, user.email);
    }

    #[test]
    fn tampered_token_fails_verification() {
        let issuer = TokenIssuer::new("test-secret", 30);
        let mut token = issuer.issue(&sample_user()).unwrap();
        token.push('x');
        let err = issuer.verify(&token).unwrap_err();
        assert!(matches!(err, PortError::InvalidCredential(_)));
    }

    #[test]
    fn token_signed_with_another_secret_fails_verification() {
        let issuer = TokenIssuer::new("test-secret", 30);
        let other = TokenIssuer::new("other-secret", 30);
        let token = other.issue(&sample_user()).unwrap();
        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn expired_token_fails_verification() {
        let issuer = TokenIssuer::new("test-secret", -1);
        let token = issuer.issue(&sample_user()).unwrap();
        let err = issuer.verify(&token).unwrap_err();
        assert!(matches!(err, PortError::InvalidCredential(_)));
    }
}
