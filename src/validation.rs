//! Input validation for signup/login credentials and task titles.
//!
//! The rules are declared on the request bodies with `#[derive(Validate)]`;
//! this module turns `validator`'s error map into `FieldErrors`. Each field
//! reports only the first rule it breaks, and the rendered message is part of
//! the public contract (clients and tests compare against it verbatim).

use std::borrow::Cow;
use std::fmt;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{Credentials, TaskInput};

/// Rule codes in the order they are reported when a field breaks several.
const RULE_ORDER: [&str; 3] = ["required", "length", "email"];

/// A single rejected field together with the human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: Cow<'static, str>,
}

/// Every field that failed validation, ordered by field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Looks up the reason recorded for `field`, if it failed.
    pub fn reason(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.reason.as_ref())
    }
}

fn rank(error: &ValidationError) -> usize {
    RULE_ORDER
        .iter()
        .position(|code| *code == error.code)
        .unwrap_or(RULE_ORDER.len())
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errors)| {
                errors.iter().min_by_key(|e| rank(e)).map(|first| FieldError {
                    field,
                    reason: first
                        .message
                        .clone()
                        .unwrap_or_else(|| first.code.clone()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(b.field));
        FieldErrors(fields)
    }
}

/// Renders as `field: reason; other: reason.`
impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.reason)?;
        }
        f.write_str(".")
    }
}

impl std::error::Error for FieldErrors {}

/// Rejects an empty value. The length rules alone cannot tell "missing"
/// apart from "too short".
pub fn not_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Runs the declared rules of any request body.
pub fn check<T: Validate>(input: &T) -> Result<(), FieldErrors> {
    input.validate().map_err(FieldErrors::from)
}

/// Validates the credentials shared by signup and login.
pub fn validate_user(email: &str, password: &str) -> Result<(), FieldErrors> {
    check(&Credentials {
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

/// Validates a task title for create and update.
pub fn validate_task(title: &str) -> Result<(), FieldErrors> {
    check(&TaskInput {
        title: title.to_owned(),
    })
}
