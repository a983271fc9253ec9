//! User service configuration.

use std::env;

use common::{DatabaseConfig, ServiceConfig};

use crate::repository::AccountDefaults;

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    /// Stamp disabled_at at creation, as the legacy schema did
    pub legacy_disabled_at: bool,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// The connection string is left empty when neither
    /// `USER_SERVICE_DATABASE_URL` nor `DATABASE_URL` is set; connecting
    /// with it fails with a connection error.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();

        let database = DatabaseConfig {
            url: env::var("USER_SERVICE_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .unwrap_or_default(),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.max_connections),
            min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                .unwrap_or(defaults.min_connections),
            pre_ping: parse_flag("DATABASE_PRE_PING").unwrap_or(defaults.pre_ping),
            sqlx_logging: parse_flag("DATABASE_SQLX_LOGGING").unwrap_or(defaults.sqlx_logging),
        };

        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            },
            database,
            legacy_disabled_at: parse_flag("USER_SERVICE_LEGACY_DISABLED_AT").unwrap_or(false),
        }
    }

    /// Defaults applied to newly created accounts.
    pub fn account_defaults(&self) -> AccountDefaults {
        AccountDefaults {
            stamp_disabled_at_on_create: self.legacy_disabled_at,
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                ..Default::default()
            },
            database: DatabaseConfig::default(),
            legacy_disabled_at: false,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn parse_flag(name: &str) -> Option<bool> {
    env::var(name).ok().and_then(|v| parse_bool(&v))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
