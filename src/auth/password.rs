use crate::error::AppError;
use bcrypt::{hash, verify};

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
}

/// Constant-time comparison of `password` against a stored bcrypt hash.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::Internal(format!("failed to verify password: {}", e)))
}
