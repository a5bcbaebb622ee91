//!
//! # Error Handling
//!
//! `AppError` is the single error type flowing out of validators, the token
//! service, repositories and services. Its variants are the failure kinds a
//! caller can act on: bad input, failed authentication, a missing owned row,
//! a backing-store failure, or an internal fault.
//!
//! At the HTTP boundary every variant collapses to a status code (400, 401 or
//! 500) with the error text as a JSON string body. The variant itself stays
//! available to service callers and tests, so a missing row and a broken
//! connection are never confused even though both surface as a 500.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::validation::FieldErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// One or more input fields were rejected (HTTP 400).
    Validation(FieldErrors),
    /// Missing, malformed or expired credential, or a failed password check (HTTP 401).
    Unauthenticated(String),
    /// No row owned by the caller matched (HTTP 500).
    NotFound(String),
    /// The backing store failed, including constraint violations (HTTP 500).
    Storage(String),
    /// Unexpected failure such as a signing or hashing error (HTTP 500).
    Internal(String),
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "{}", errors),
            AppError::Unauthenticated(msg) => write!(f, "unauthenticated: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::Storage(msg) => write!(f, "storage error: {}", msg),
            AppError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// The body is the error text encoded as a JSON string, with no envelope.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_string())
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> AppError {
        AppError::Validation(errors)
    }
}

/// `RowNotFound` becomes `NotFound`; every other sqlx failure is a storage error.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("record not found".into()),
            _ => AppError::Storage(error.to_string()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthenticated(format!("invalid token: {}", error))
    }
}
