//! Shared configuration structures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment name that exposes raw error text to clients
pub const DEVELOPMENT_ENVIRONMENT: &str = "development";

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and the API descriptor
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Deployment environment (`development`, `production`, ...)
    pub environment: String,
}

impl ServiceConfig {
    /// Development mode shows raw storage errors in responses
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case(DEVELOPMENT_ENVIRONMENT)
    }

    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "users-api".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "production".to_string(),
        }
    }
}

/// Which persistence backend a database URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    /// Embedded single-file store
    Sqlite,
    /// Networked relational pool
    Postgres,
}

impl DatabaseKind {
    /// Detect the backend from a connection URL scheme
    pub fn from_url(url: &str) -> Option<Self> {
        let scheme = url.split(':').next()?.to_ascii_lowercase();
        match scheme.as_str() {
            "sqlite" => Some(DatabaseKind::Sqlite),
            "postgres" | "postgresql" => Some(DatabaseKind::Postgres),
            _ => None,
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseKind::Sqlite => write!(f, "sqlite"),
            DatabaseKind::Postgres => write!(f, "postgres"),
        }
    }
}

/// Database configuration.
#[derive(Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    /// Log every SQL statement at debug level
    pub log_statements: bool,
}

impl DatabaseConfig {
    /// Build a SQLite URL for a file path, creating the file if missing
    pub fn sqlite_url(path: &str) -> String {
        format!("sqlite://{}?mode=rwc", path)
    }

    /// Backend selected by the URL scheme
    pub fn kind(&self) -> Option<DatabaseKind> {
        DatabaseKind::from_url(&self.url)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("log_statements", &self.log_statements)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: Self::sqlite_url("./database.sqlite"),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 5,
            log_statements: false,
        }
    }
}
