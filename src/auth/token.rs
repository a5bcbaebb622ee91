use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::UserId;

/// How long an issued credential stays valid.
pub const TOKEN_TTL_HOURS: i64 = 12;

/// Represents the claims encoded within a JWT.
///
/// `userId` is kept as a raw JSON value: it is only trusted after the
/// signature and expiry checks pass, and then only through
/// [`TokenService::owner_identity`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<serde_json::Value>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Issues and verifies signed, time-limited credentials with one
/// process-wide HS256 secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Mints a credential for `owner`, valid for [`TOKEN_TTL_HOURS`].
    pub fn issue(&self, owner: UserId) -> Result<String, AppError> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
            .ok_or_else(|| AppError::Internal("token expiry overflows".into()))?
            .timestamp();

        let claims = Claims {
            user_id: Some(serde_json::Value::from(owner.0)),
            exp: expiration,
        };
        self.sign(&claims)
    }

    /// Signs arbitrary claims. Signing failures are internal errors.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
    }

    /// Checks signature and expiry, then returns the decoded claims.
    ///
    /// Malformed, tampered, foreign-signed and expired tokens all fail with
    /// `Unauthenticated`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(AppError::from)
    }

    /// Reads the owner identity out of verified claims, failing closed.
    pub fn owner_identity(claims: &Claims) -> Result<UserId, AppError> {
        UserId::from_claim(claims.user_id.as_ref())
    }

    /// Verify followed by identity extraction.
    pub fn authenticate(&self, token: &str) -> Result<UserId, AppError> {
        let claims = self.verify(token)?;
        Self::owner_identity(&claims)
    }
}
