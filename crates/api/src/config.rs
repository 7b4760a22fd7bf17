use cookbook_core::password_policy::DEFAULT_MIN_PASSWORD_LENGTH;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Database connection string.
    pub database_url: String,
    /// Debug mode, reported on the system page (default: `false`).
    pub debug: bool,
    /// Whether this process serves uploaded media itself (default: `false`).
    pub serve_media: bool,
    /// Authentication is delegated to a fronting proxy (default: `false`).
    /// Disables first-run setup.
    pub remote_user_auth: bool,
    /// Minimum accepted password length (default: `8`).
    pub min_password_length: usize,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
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
    /// | `DATABASE_URL`         | -- (required)              |
    /// | `DEBUG`                | `false`                    |
    /// | `SERVE_MEDIA`          | `false`                    |
    /// | `REMOTE_USER_AUTH`     | `false`                    |
    /// | `MIN_PASSWORD_LENGTH`  | `8`                        |
    ///
    /// # Panics
    ///
    /// Panics if a variable is set but malformed, or `DATABASE_URL` is missing.
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

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let min_password_length: usize = std::env::var("MIN_PASSWORD_LENGTH")
            .unwrap_or_else(|_| DEFAULT_MIN_PASSWORD_LENGTH.to_string())
            .parse()
            .expect("MIN_PASSWORD_LENGTH must be a valid usize");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            debug: env_flag("DEBUG"),
            serve_media: env_flag("SERVE_MEDIA"),
            remote_user_auth: env_flag("REMOTE_USER_AUTH"),
            min_password_length,
            jwt,
        }
    }

    /// Whether `database_url` points at something other than PostgreSQL.
    pub fn non_postgres_backend(&self) -> bool {
        let scheme = self
            .database_url
            .split_once("://")
            .map(|(scheme, _)| scheme)
            .unwrap_or_default();
        !matches!(scheme, "postgres" | "postgresql")
    }
}

/// Read a boolean flag; unset means `false`.
fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
