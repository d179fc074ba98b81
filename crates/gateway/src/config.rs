//! Gateway configuration.

use std::env;
use std::str::FromStr;

use common::{DatabaseConfig, ServiceConfig};

/// Gateway configuration.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// Bind address, service name and environment
    pub service: ServiceConfig,
    /// Database URL and pool settings
    pub database: DatabaseConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let service_defaults = ServiceConfig::default();
        let database_defaults = DatabaseConfig::default();

        let service = ServiceConfig {
            service_name: service_defaults.service_name,
            host: env::var("HOST").unwrap_or(service_defaults.host),
            port: parse_var("PORT").unwrap_or(service_defaults.port),
            environment: env::var("APP_ENV")
                .or_else(|_| env::var("NODE_ENV"))
                .unwrap_or(service_defaults.environment),
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL")
                .or_else(|_| env::var("DB_PATH").map(|path| DatabaseConfig::sqlite_url(&path)))
                .unwrap_or(database_defaults.url),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(database_defaults.max_connections),
            min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                .unwrap_or(database_defaults.min_connections),
            connect_timeout_secs: parse_var("DATABASE_CONNECT_TIMEOUT_SECS")
                .unwrap_or(database_defaults.connect_timeout_secs),
            log_statements: parse_var("DATABASE_LOG_STATEMENTS")
                .unwrap_or(database_defaults.log_statements),
        };

        Self { service, database }
    }

    /// Override host and port from the command line.
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.service.host = host;
        }
        if let Some(port) = port {
            self.service.port = port;
        }
        self
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
