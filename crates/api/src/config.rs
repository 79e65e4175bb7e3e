use std::time::Duration;

use furnicraft_core::lockout::{LockoutPolicy, DEFAULT_LOCK_DURATION_MINS, DEFAULT_MAX_ATTEMPTS};
use furnicraft_db::PoolSettings;

use crate::auth::jwt::JwtConfig;
use crate::auth::password::PasswordConfig;

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
    /// Upper bound on draining connections after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Connection pool sizing.
    pub pool: PoolSettings,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// Failed-login lockout threshold and duration.
    pub lockout: LockoutPolicy,
    /// Argon2id cost parameters for new password hashes.
    pub password: PasswordConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `3000`                  |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`    | `30`                    |
    /// | `DB_MAX_CONNECTIONS`       | `20`                    |
    /// | `DB_ACQUIRE_TIMEOUT_SECS`  | `30`                    |
    /// | `LOGIN_MAX_ATTEMPTS`       | `5`                     |
    /// | `LOGIN_LOCK_DURATION_MINS` | `120`                   |
    ///
    /// JWT and password settings are read by [`JwtConfig::from_env`] and
    /// [`PasswordConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on unparsable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = env_or("PORT", 3000);

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);
        let shutdown_timeout_secs: u64 = env_or("SHUTDOWN_TIMEOUT_SECS", 30);

        let pool = PoolSettings {
            max_connections: env_or("DB_MAX_CONNECTIONS", 20),
            acquire_timeout: Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", 30)),
        };

        let max_attempts: i32 = env_or("LOGIN_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS);
        assert!(max_attempts > 0, "LOGIN_MAX_ATTEMPTS must be positive");
        let lockout = LockoutPolicy {
            max_attempts,
            lock_duration: chrono::Duration::minutes(env_or(
                "LOGIN_LOCK_DURATION_MINS",
                DEFAULT_LOCK_DURATION_MINS,
            )),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            pool,
            jwt: JwtConfig::from_env(),
            lockout,
            password: PasswordConfig::from_env(),
        }
    }
}

/// Read an env var and parse it, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse as `T`.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
