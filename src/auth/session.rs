//! The auth cookie used by the browser login flow.

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use super::token::TOKEN_TTL_HOURS;

pub const AUTH_COOKIE: &str = "taskvault-token";

/// Attributes shared by every auth cookie this server sets.
#[derive(Debug, Clone, Default)]
pub struct CookieSettings {
    pub domain: Option<String>,
    pub secure: bool,
}

impl CookieSettings {
    /// Cookie carrying a freshly issued credential, living as long as the token.
    pub fn login_cookie(&self, token: String) -> Cookie<'static> {
        self.build(token, Duration::hours(TOKEN_TTL_HOURS))
    }

    /// Empty cookie that expires immediately, clearing the browser's copy.
    pub fn logout_cookie(&self) -> Cookie<'static> {
        self.build(String::new(), Duration::ZERO)
    }

    fn build(&self, value: String, max_age: Duration) -> Cookie<'static> {
        let mut cookie = Cookie::build(AUTH_COOKIE, value)
            .path("/")
            .http_only(true)
            .same_site(SameSite::None)
            .secure(self.secure)
            .max_age(max_age)
            .finish();
        if let Some(domain) = &self.domain {
            cookie.set_domain(domain.clone());
        }
        cookie
    }
}
