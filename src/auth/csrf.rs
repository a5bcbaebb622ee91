use serde::Serialize;
use uuid::Uuid;

/// Anti-forgery token generated once per process start and echoed back to
/// browser clients on request.
#[derive(Debug, Clone, Serialize)]
pub struct CsrfToken {
    csrf: String,
}

impl CsrfToken {
    pub fn generate() -> Self {
        Self {
            csrf: Uuid::new_v4().simple().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.csrf
    }
}
