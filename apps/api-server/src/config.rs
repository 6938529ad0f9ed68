//! Application configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use idea_core::ports::RateLimitConfig;
use idea_infra::DatabaseConfig;

/// Configuration errors. Any of these aborts startup.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Deployment environment, from `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            _ => Err("expected development, production or test".to_string()),
        }
    }
}

/// Minimum log level, from `LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err("expected error, warn, info or debug".to_string()),
        }
    }
}

/// Settings that are read and validated but not used by any route yet.
#[derive(Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub api_key: Option<String>,
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub rate_limit: RateLimitConfig,
    /// Allowed CORS origins, as listed in `CORS_ORIGIN`.
    pub cors_origins: Vec<String>,
    /// Key rate limits on `Forwarded`/`X-Forwarded-For` instead of the peer address.
    pub trust_proxy: bool,
    pub log_level: LogLevel,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_requests: u32 = parse_var(&lookup, "RATE_LIMIT_MAX", 100)?;
        if max_requests == 0 {
            return Err(invalid("RATE_LIMIT_MAX", "0", "must be greater than zero"));
        }

        let window_ms: u64 = parse_var(&lookup, "RATE_LIMIT_WINDOW", 60_000)?;
        if window_ms == 0 {
            return Err(invalid(
                "RATE_LIMIT_WINDOW",
                "0",
                "must be greater than zero",
            ));
        }

        let cors_origins = lookup("CORS_ORIGIN")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_var(&lookup, "PORT", 3001)?,
            environment: parse_var(&lookup, "NODE_ENV", Environment::Development)?,
            database: DatabaseConfig {
                url: database_url,
                max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", 20)?,
                min_connections: parse_var(&lookup, "DB_MIN_CONNECTIONS", 1)?,
            },
            security: SecurityConfig {
                jwt_secret: lookup("JWT_SECRET").unwrap_or_else(|| "dev-secret-key".to_string()),
                api_key: lookup("API_KEY"),
            },
            rate_limit: RateLimitConfig {
                max_requests,
                window: Duration::from_millis(window_ms),
            },
            cors_origins,
            trust_proxy: parse_var(&lookup, "TRUST_PROXY", false)?,
            log_level: parse_var(&lookup, "LOG_LEVEL", LogLevel::Info)?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| invalid(key, &raw, e.to_string())),
    }
}

fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.into(),
    }
}
