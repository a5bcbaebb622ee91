use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::AppError;
use crate::validation::not_empty;

/// Identity of a user and, for tasks, of their owner.
///
/// Handlers only ever obtain one from a verified credential; request bodies
/// never carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Converts the loosely-typed claim value into an identity.
    ///
    /// Accepts a positive integral number (integers or floats with no
    /// fractional part, as some token issuers emit `1.0`). Anything else is
    /// rejected; there is no fallback identity.
    pub fn from_claim(value: Option<&serde_json::Value>) -> Result<Self, AppError> {
        let number = match value {
            Some(serde_json::Value::Number(n)) => n,
            Some(_) => return Err(AppError::Unauthenticated("userId claim is not a number".into())),
            None => return Err(AppError::Unauthenticated("userId claim is missing".into())),
        };

        let id = if let Some(i) = number.as_i64() {
            Some(i)
        } else if let Some(f) = number.as_f64() {
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
            (f.fract() == 0.0 && f >= 1.0 && f < i64::MAX as f64).then(|| f as i64)
        } else {
            None
        };

        match id {
            Some(id) if id > 0 => Ok(UserId(id)),
            _ => Err(AppError::Unauthenticated(format!(
                "userId claim is not a valid identity: {}",
                number
            ))),
        }
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored user row. The password hash never leaves the service layer.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `/signup` and `/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    #[serde(default)]
    #[validate(
        custom(function = "not_empty", code = "required", message = "email is required"),
        length(max = 30, message = "limited max 30 char"),
        email(message = "is not valid email format")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(
        custom(function = "not_empty", code = "required", message = "password is required"),
        length(min = 6, max = 30, message = "limited min 6 max 30 char")
    )]
    pub password: String,
}

/// What a client learns about a user after signup.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}
