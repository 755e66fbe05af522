//! Process settings loaded once at startup from the environment.
//!
//! Values come from real environment variables, optionally pre-populated from a
//! `.env` file by `dotenvy` in `main`. Every setting has a development default.

use crate::errors::{Error, Result};
use chrono::Duration;
use std::net::SocketAddr;

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Address to bind, e.g. `0.0.0.0:8080`
    pub address: SocketAddr,
}

/// Relational store connection parameters
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// Host name
    pub host: String,
    /// TCP port
    pub port: u16,
    /// User name
    pub user: String,
    /// Password
    pub password: String,
    /// Database name
    pub name: String,
    /// TLS mode passed through as `sslmode`
    pub ssl_mode: String,
    /// Full connection URL overriding the individual parameters
    pub url: Option<String>,
}

/// Token signing settings
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Shared HMAC secret
    pub secret_key: String,
    /// Lifetime of an issued token
    pub token_expiry: Duration,
}

/// All settings the service needs
#[derive(Debug, Clone)]
pub struct Settings {
    /// HTTP listener
    pub server: ServerSettings,
    /// Relational store
    pub database: DatabaseSettings,
    /// Token issuing
    pub auth: AuthSettings,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let address = parse_address(&get("SERVER_ADDRESS", ":8080"))?;

        let port_text = get("DB_PORT", "5432");
        let port = port_text.parse::<u16>().map_err(|e| Error::Config {
            message: format!("Invalid DB_PORT '{port_text}': {e}"),
        })?;

        let token_expiry = parse_duration(&get("AUTH_TOKEN_EXPIRY", "24h"))?;

        Ok(Self {
            server: ServerSettings { address },
            database: DatabaseSettings {
                host: get("DB_HOST", "localhost"),
                port,
                user: get("DB_USER", "postgres"),
                password: get("DB_PASSWORD", "postgres"),
                name: get("DB_NAME", "inventory"),
                ssl_mode: get("DB_SSLMODE", "disable"),
                url: lookup("DATABASE_URL"),
            },
            auth: AuthSettings {
                secret_key: get("AUTH_SECRET_KEY", "secret-key"),
                token_expiry,
            },
        })
    }
}

/// Parses a bind address. A bare `:port` binds all interfaces.
pub fn parse_address(text: &str) -> Result<SocketAddr> {
    let full = if text.starts_with(':') {
        format!("0.0.0.0{text}")
    } else {
        text.to_string()
    };
    full.parse().map_err(|e| Error::Config {
        message: format!("Invalid SERVER_ADDRESS '{text}': {e}"),
    })
}

/// Parses a duration such as `24h`, `30m`, `90s` or `7d`.
pub fn parse_duration(text: &str) -> Result<Duration> {
    let invalid = || Error::Config {
        message: format!("Invalid duration '{text}', expected e.g. 24h, 30m, 90s"),
    };

    let trimmed = text.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (number, unit) = trimmed.split_at(split);
    let value: i64 = number.parse().map_err(|_| invalid())?;

    let duration = match unit {
        "s" => Duration::try_seconds(value),
        "m" => Duration::try_minutes(value),
        "h" => Duration::try_hours(value),
        "d" => Duration::try_days(value),
        _ => None,
    };
    duration.filter(|d| *d > Duration::zero()).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(settings.server.address.port(), 8080);
        assert!(settings.server.address.ip().is_unspecified());
        assert_eq!(settings.database.host, "localhost");
        assert_eq!(settings.database.port, 5432);
        assert_eq!(settings.database.name, "inventory");
        assert_eq!(settings.database.ssl_mode, "disable");
        assert!(settings.database.url.is_none());
        assert_eq!(settings.auth.token_expiry, Duration::hours(24));
    }

    #[test]
    fn test_values_from_lookup() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SERVER_ADDRESS", "127.0.0.1:9000"),
            ("DB_PORT", "6543"),
            ("AUTH_TOKEN_EXPIRY", "30m"),
            ("AUTH_SECRET_KEY", "hunter2"),
            ("DATABASE_URL", "sqlite://data/assets.sqlite"),
        ]);
        let settings =
            Settings::from_lookup(|key| env.get(key).map(|v| (*v).to_string())).unwrap();
        assert_eq!(settings.server.address.to_string(), "127.0.0.1:9000");
        assert_eq!(settings.database.port, 6543);
        assert_eq!(settings.auth.token_expiry, Duration::minutes(30));
        assert_eq!(settings.auth.secret_key, "hunter2");
        assert_eq!(
            settings.database.url.as_deref(),
            Some("sqlite://data/assets.sqlite")
        );
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let bad_expiry = Settings::from_lookup(|key| {
            (key == "AUTH_TOKEN_EXPIRY").then(|| "forever".to_string())
        });
        assert!(matches!(bad_expiry, Err(Error::Config { .. })));

        let bad_port = Settings::from_lookup(|key| (key == "DB_PORT").then(|| "abc".to_string()));
        assert!(matches!(bad_port, Err(Error::Config { .. })));
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("90s").unwrap(), Duration::seconds(90));
        assert_eq!(parse_duration("7d").unwrap(), Duration::days(7));
        assert!(parse_duration("0h").is_err());
        assert!(parse_duration("h").is_err());
        assert!(parse_duration("12").is_err());
        assert!(parse_duration("3w").is_err());
    }
}
