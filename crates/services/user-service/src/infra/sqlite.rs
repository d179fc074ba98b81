//! Embedded single-file store.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement, Value};

use common::{DatabaseKind, StorageError};

use super::adapter::{is_insert, ExecOutcome, PersistenceAdapter, Row};

/// SQLite implementation of [`PersistenceAdapter`].
#[derive(Clone)]
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn statement(sql: &str, params: Vec<Value>) -> Statement {
        let sql = to_sqlite_placeholders(sql);
        tracing::debug!(sql = %sql, "sqlite statement");
        Statement::from_sql_and_values(DbBackend::Sqlite, sql, params)
    }
}

#[async_trait]
impl PersistenceAdapter for SqliteStore {
    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Sqlite
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
        let result = self.db.execute(Self::statement(sql, params)).await?;
        let inserted_id = if is_insert(sql) {
            i64::try_from(result.last_insert_id()).ok()
        } else {
            None
        };

        Ok(ExecOutcome {
            inserted_id,
            affected: result.rows_affected(),
        })
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.db
            .execute(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

/// Rewrite `$N` placeholders into SQLite's numbered `?N` form.
///
/// Statements are generated in this crate and never contain `$` inside
/// string literals.
pub(crate) fn to_sqlite_placeholders(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek().is_some_and(|next| next.is_ascii_digit()) {
            out.push('?');
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_numbered_placeholders() {
        assert_eq!(
            to_sqlite_placeholders("SELECT id FROM users WHERE email = $1 AND id != $2"),
            "SELECT id FROM users WHERE email = ?1 AND id != ?2"
        );
    }

    #[test]
    fn keeps_multi_digit_and_repeated_placeholders() {
        assert_eq!(
            to_sqlite_placeholders("VALUES ($10, $4, $4)"),
            "VALUES (?10, ?4, ?4)"
        );
    }

    #[test]
    fn leaves_bare_dollar_alone() {
        assert_eq!(to_sqlite_placeholders("SELECT '$' || $1"), "SELECT '$' || ?1");
    }
}
