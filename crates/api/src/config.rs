use std::fmt::Display;
use std::net::IpAddr;
use std::str::FromStr;

use axum::http::HeaderValue;

use crate::auth::jwt::JwtConfig;

/// Startup configuration failure. Names the offending variable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` and `JWT_SECRET` has a default suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Upper bound on pooled connections (default: `20`).
    pub db_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Whether the session cookie carries the `Secure` attribute (default: `true`).
    pub cookie_secure: bool,
    /// JWT signing secret and token lifetime.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `DATABASE_URL`         | required                   |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `COOKIE_SECURE`        | `true`                     |
    /// | `JWT_SECRET`           | required                   |
    /// | `JWT_EXPIRY_HOURS`     | `24`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".into()),
        )?;

        Ok(Self {
            host: env_or("HOST", "0.0.0.0")?,
            port: env_or("PORT", "3000")?,
            database_url,
            db_max_connections: env_or(
                "DB_MAX_CONNECTIONS",
                &ideatrack_db::DEFAULT_MAX_CONNECTIONS.to_string(),
            )?,
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", "30")?,
            cookie_secure: env_or("COOKIE_SECURE", "true")?,
            jwt: JwtConfig::from_env()?,
        })
    }
}

/// Read and parse an environment variable, falling back to `default`.
pub(crate) fn env_or<T>(name: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let value = std::env::var(name).unwrap_or_else(|_| default.to_string());
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        name,
        value,
        reason: e.to_string(),
    })
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                name: "CORS_ORIGINS",
                value: origin.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
