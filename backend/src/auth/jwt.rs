//! JWT token issuance and verification
//!
//! Tokens are HS256-signed and carry a single identity claim, the account
//! email, plus issue and expiry timestamps. Nothing is stored server-side:
//! a token is valid exactly when its signature checks out and it has not
//! expired.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Email of the account the token was issued to
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Token errors
///
/// Verification failures carry no detail: expired, forged and
/// malformed tokens are indistinguishable to callers.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Invalid token")]
    Invalid,
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::Signing("signing secret is not configured".to_string()));
        }

        Ok(Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        })
    }
}

/// JWT service for token operations
///
/// Cloning is cheap: keys are behind `Arc`.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    expiry: Duration,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// Fails with [`TokenError::Signing`] when the secret is empty or the
    /// lifetime is not a positive, representable number of seconds. Call
    /// this once at startup; the failure is a configuration error.
    pub fn new(secret: &str, token_expiry_secs: i64) -> Result<Self, TokenError> {
        let expiry = Duration::try_seconds(token_expiry_secs)
            .filter(|expiry| *expiry > Duration::zero())
            .ok_or_else(|| {
                TokenError::Signing(format!("token expiry of {token_expiry_secs}s is out of range"))
            })?;

        Ok(Self {
            keys: JwtKeys::new(secret)?,
            expiry,
        })
    }

    /// Token lifetime in seconds
    #[inline]
    pub fn expiry_secs(&self) -> i64 {
        self.expiry.num_seconds()
    }

    /// Issue a token for `email`, valid from now
    #[inline]
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        self.issue_at(email, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, email: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let exp = now
            .checked_add_signed(self.expiry)
            .ok_or_else(|| TokenError::Signing("token expiry overflows the clock".to_string()))?;

        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return the email it was issued to
    #[inline]
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against the clock value `now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        Ok(self.decode_at(token, now)?.email)
    }

    /// Verify a token against `now` and return its full claims
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        // Expiry is checked below against the supplied clock, with no leeway
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(token, &self.keys.decoding, &validation)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                TokenError::Invalid
            })?
            .claims;

        if claims.exp <= now.timestamp() {
            debug!("Token rejected: expired");
            return Err(TokenError::Invalid);
        }

        Ok(claims)
    }
}
