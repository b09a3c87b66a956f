//! Session Token Service
//!
//! Issues and verifies the signed, time-limited tokens carried in the admin
//! session cookie. Tokens are HS256 JWTs with `sub`, `username`, `iat` and
//! `exp` claims; nothing about them is persisted.
//!
//! Verification is pure. The `*_at` variants take the clock as an argument.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::value_object::AdminId;

/// Why a token was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature mismatch, wrong secret, or not a token at all
    #[error("Token signature is invalid")]
    InvalidSignature,

    /// Signature is fine but the token is past its expiry
    #[error("Token has expired")]
    Expired,

    /// Encoding failed while issuing
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id (UUID)
    pub sub: String,
    /// Admin name at issue time
    pub username: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Freshly issued token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Identity recovered from a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub admin_id: AdminId,
    pub admin_name: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies session tokens with one symmetric secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token valid from now for the configured lifetime
    pub fn issue(&self, admin_id: &AdminId, admin_name: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(admin_id, admin_name, Utc::now())
    }

    pub fn issue_at(
        &self,
        admin_id: &AdminId,
        admin_name: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let ttl = chrono::Duration::from_std(self.ttl)
            .map_err(|e| TokenError::Signing(format!("Token lifetime out of range: {e}")))?;
        let expires_at = now + ttl;

        let claims = Claims {
            sub: admin_id.to_string(),
            username: admin_name.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature, then expiry, against the current time
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<VerifiedToken, TokenError> {
        let claims = self.decode_claims(token)?;

        if now.timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        let admin_id = claims
            .sub
            .parse::<AdminId>()
            .map_err(|_| TokenError::InvalidSignature)?;
        let issued_at =
            DateTime::from_timestamp(claims.iat, 0).ok_or(TokenError::InvalidSignature)?;
        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or(TokenError::InvalidSignature)?;

        Ok(VerifiedToken {
            admin_id,
            admin_name: claims.username,
            issued_at,
            expires_at,
        })
    }

    /// Signature check only; expiry is compared against our own clock.
    ///
    /// Every decode failure (bad base64, bad JSON, wrong algorithm, wrong
    /// signature) is reported as `InvalidSignature`.
    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Session token rejected");
                TokenError::InvalidSignature
            })
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("keys", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}
