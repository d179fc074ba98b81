//! Uniform query interface over the two storage backends.

use async_trait::async_trait;
use sea_orm::{QueryResult, Value};

use common::{DatabaseKind, StorageError};

/// One result row as returned by the driver
pub type Row = QueryResult;

/// Result of a statement that does not return rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Id generated by an `INSERT` (last one for multi-row inserts)
    pub inserted_id: Option<i64>,
    /// Number of rows written or removed
    pub affected: u64,
}

/// Executes parameterized statements against a relational store.
///
/// Statements use numbered placeholders (`$1`, `$2`, ...) on every backend;
/// implementations translate them to their native form. Each call is its own
/// unit of work: no retries, no transaction spanning calls. Tables written
/// through `execute` carry an integer `id` primary key.
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    /// Backend behind this adapter
    fn kind(&self) -> DatabaseKind;

    /// Run a query and collect every row
    async fn query_many(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>, StorageError>;

    /// Run a query and return the first row, if any
    async fn query_one(&self, sql: &str, params: Vec<Value>)
        -> Result<Option<Row>, StorageError>;

    /// Run a write statement
    async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<ExecOutcome, StorageError>;

    /// Round-trip a trivial query to prove the store is reachable
    async fn ping(&self) -> Result<(), StorageError>;
}

/// Whether a statement is an `INSERT`
pub(crate) fn is_insert(sql: &str) -> bool {
    sql.trim_start()
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("insert"))
}
