//! Database connection and backend selection.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database as SeaDatabase};

use common::{DatabaseConfig, DatabaseKind, StorageError};

use super::adapter::PersistenceAdapter;
use super::postgres::PostgresStore;
use super::sqlite::SqliteStore;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    adapter: Arc<dyn PersistenceAdapter>,
}

impl Database {
    /// Open a pool for the configured URL and pick the matching adapter.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let kind = config.kind().ok_or_else(|| {
            StorageError::new("Unsupported database URL: expected sqlite: or postgres://")
        })?;

        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .sqlx_logging(config.log_statements);

        let connection = SeaDatabase::connect(options).await?;
        tracing::info!(backend = %kind, "Database pool opened");

        let adapter: Arc<dyn PersistenceAdapter> = match kind {
            DatabaseKind::Sqlite => Arc::new(SqliteStore::new(connection)),
            DatabaseKind::Postgres => Arc::new(PostgresStore::new(connection)),
        };

        Ok(Self { adapter })
    }

    /// Backend in use
    pub fn kind(&self) -> DatabaseKind {
        self.adapter.kind()
    }

    /// Shared handle to the adapter
    pub fn adapter(&self) -> Arc<dyn PersistenceAdapter> {
        self.adapter.clone()
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), StorageError> {
        self.adapter.ping().await
    }
}
