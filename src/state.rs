use std::sync::Arc;

use crate::auth::{CookieSettings, CsrfToken, TokenService};
use crate::config::Config;
use crate::repository::{TaskRepository, UserRepository};
use crate::services::{TaskService, UserService};

/// Everything handlers and `AuthMiddleware` need, registered once as
/// `web::Data<AppState>`. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub tokens: TokenService,
    pub tasks: TaskService,
    pub users: UserService,
    pub cookies: CookieSettings,
    pub csrf: CsrfToken,
}

impl AppState {
    pub fn new(
        config: &Config,
        users: Arc<dyn UserRepository>,
        tasks: Arc<dyn TaskRepository>,
    ) -> Self {
        let tokens = TokenService::new(&config.jwt_secret);
        Self {
            users: UserService::new(users, tokens.clone(), config.bcrypt_cost),
            tasks: TaskService::new(tasks),
            tokens,
            cookies: CookieSettings {
                domain: config.api_domain.clone(),
                secure: config.cookie_secure,
            },
            csrf: CsrfToken::generate(),
        }
    }
}
