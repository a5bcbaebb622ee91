use std::env;

use crate::error::AppError;

const DEFAULT_BCRYPT_COST: u32 = 10;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    /// Secret used to sign and verify auth tokens.
    pub jwt_secret: String,
    /// Domain attribute of the auth cookie; host-only when unset.
    pub api_domain: Option<String>,
    /// Origin allowed to make credentialed cross-origin calls.
    pub frontend_url: Option<String>,
    pub cookie_secure: bool,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => compose_database_url(&get)?,
        };

        let jwt_secret = get("SECRET")
            .ok_or_else(|| AppError::Internal("SECRET must be set".into()))?;

        Ok(Self {
            database_url,
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 10)?,
            server_port: parse_or(&get, "SERVER_PORT", 8080)?,
            server_host: get("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt_secret,
            api_domain: get("API_DOMAIN"),
            frontend_url: get("FE_URL"),
            cookie_secure: parse_or(&get, "COOKIE_SECURE", false)?,
            bcrypt_cost: parse_or(&get, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn compose_database_url<G>(get: &G) -> Result<String, AppError>
where
    G: Fn(&str) -> Option<String>,
{
    let part = |key: &str| {
        get(key).ok_or_else(|| {
            AppError::Internal(format!("DATABASE_URL or {} must be set", key))
        })
    };
    Ok(format!(
        "postgres://{}:{}@{}:{}/{}",
        part("POSTGRES_USER")?,
        part("POSTGRES_PW")?,
        part("POSTGRES_HOST")?,
        part("POSTGRES_PORT")?,
        part("POSTGRES_DB")?,
    ))
}

fn parse_or<G, T>(get: &G, key: &str, default: T) -> Result<T, AppError>
where
    G: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Internal(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}
