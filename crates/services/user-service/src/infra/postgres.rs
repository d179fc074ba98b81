//! Networked relational pool.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement, Value};

use common::{DatabaseKind, StorageError};

use super::adapter::{is_insert, ExecOutcome, PersistenceAdapter, Row};

/// PostgreSQL implementation of [`PersistenceAdapter`].
#[derive(Clone)]
pub struct PostgresStore {
    db: DatabaseConnection,
}

impl PostgresStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn statement(sql: impl Into<String>, params: Vec<Value>) -> Statement {
        let sql = sql.into();
        tracing::debug!(sql = %sql, "postgres statement");
        Statement::from_sql_and_values(DbBackend::Postgres, sql, params)
    }
}

#[async_trait]
impl PersistenceAdapter for PostgresStore {
    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Postgres
    }

    async fn query_many(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>, StorageError> {
        Ok(self.db.query_all(Self::statement(sql, params)).await?)
    }

    async fn query_one(
        &self,
        sql: &str,
        params: Vec<Value>,
    ) -> Result<Option<Row>, StorageError> {
        Ok(self.db.query_one(Self::statement(sql, params)).await?)
    }

    async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<ExecOutcome, StorageError> {
        // Postgres has no last-insert rowid; ask for the ids back instead
        if is_insert(sql) {
            let rows = self
                .db
                .query_all(Self::statement(with_returning_id(sql), params))
                .await?;
            let inserted_id = rows
                .last()
                .map(|row| row.try_get::<i64>("", "id"))
                .transpose()?;

            return Ok(ExecOutcome {
                inserted_id,
                affected: rows.len() as u64,
            });
        }

        let result = self.db.execute(Self::statement(sql, params)).await?;
        Ok(ExecOutcome {
            inserted_id: None,
            affected: result.rows_affected(),
        })
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.db
            .execute(Statement::from_string(
                DbBackend::Postgres,
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

/// Append `RETURNING id` unless the statement already returns something.
fn with_returning_id(sql: &str) -> String {
    let sql = sql.trim_end().trim_end_matches(';');
    if sql.to_ascii_lowercase().contains(" returning ") {
        sql.to_string()
    } else {
        format!("{} RETURNING id", sql)
    }
}
