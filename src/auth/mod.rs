pub mod csrf;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod session;
pub mod token;

pub use csrf::CsrfToken;
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use session::{CookieSettings, AUTH_COOKIE};
pub use token::{Claims, TokenService};
