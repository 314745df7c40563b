use eventlog_core::listing::DEFAULT_PER_PAGE;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Rows per page when a user has no stored preference (default: `20`).
    pub default_per_page: i64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Secret for anti-forgery action tokens. Defaults to the JWT secret
    /// when `NONCE_SECRET` is unset.
    pub nonce_secret: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `EVENTS_PER_PAGE`      | `20`                       |
    /// | `NONCE_SECRET`         | value of `JWT_SECRET`      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let default_per_page: i64 = std::env::var("EVENTS_PER_PAGE")
            .unwrap_or_else(|_| DEFAULT_PER_PAGE.to_string())
            .parse()
            .expect("EVENTS_PER_PAGE must be a valid i64");

        let jwt = JwtConfig::from_env();

        let nonce_secret = std::env::var("NONCE_SECRET").unwrap_or_else(|_| jwt.secret.clone());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            default_per_page,
            jwt,
            nonce_secret,
        }
    }
}
