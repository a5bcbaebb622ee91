use std::sync::Arc;

use log::{info, warn};
use tokio::sync::OnceCell;

use crate::auth::{hash_password, verify_password, TokenService};
use crate::error::AppError;
use crate::models::UserResponse;
use crate::repository::UserRepository;
use crate::validation::validate_user;

const INVALID_CREDENTIALS: &str = "invalid email or password";
const DUMMY_PASSWORD: &str = "taskvault-no-such-user";

/// Signup and login.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    tokens: TokenService,
    bcrypt_cost: u32,
    /// Hash checked when the email is unknown, so both login failures cost
    /// one bcrypt verification.
    dummy_hash: Arc<OnceCell<String>>,
}

/// bcrypt is CPU-bound; keep it off the async workers.
async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("password task failed: {}", e)))?
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            repo,
            tokens,
            bcrypt_cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    async fn unknown_user_hash(&self) -> Result<String, AppError> {
        let cost = self.bcrypt_cost;
        self.dummy_hash
            .get_or_try_init(|| blocking(move || hash_password(DUMMY_PASSWORD, cost)))
            .await
            .cloned()
    }

    /// Validates the credentials, hashes the password and stores the user.
    /// A taken email surfaces as a storage error.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<UserResponse, AppError> {
        validate_user(email, password)?;

        let cost = self.bcrypt_cost;
        let password = password.to_owned();
        let password_hash = blocking(move || hash_password(&password, cost)).await?;

        let user = self.repo.create(email, &password_hash).await?;
        info!("user {} signed up", user.id);
        Ok(user.into())
    }

    /// Checks the credentials and issues a token for the user.
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        validate_user(email, password)?;

        let user = match self.repo.find_by_email(email).await? {
            Some(user) => user,
            None => {
                let password = password.to_owned();
                let stored_hash = self.unknown_user_hash().await?;
                blocking(move || verify_password(&password, &stored_hash)).await?;
                warn!("login failed: unknown email");
                return Err(AppError::Unauthenticated(INVALID_CREDENTIALS.into()));
            }
        };

        let password = password.to_owned();
        let stored_hash = user.password_hash.clone();
        let matches = blocking(move || verify_password(&password, &stored_hash)).await?;
        if !matches {
            warn!("login failed for user {}: password mismatch", user.id);
            return Err(AppError::Unauthenticated(INVALID_CREDENTIALS.into()));
        }

        info!("user {} logged in", user.id);
        self.tokens.issue(user.id)
    }
}
