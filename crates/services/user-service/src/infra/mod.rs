//! Infrastructure layer - database connection, persistence adapters and schema.

mod adapter;
mod db;
mod postgres;
pub mod schema;
mod sqlite;

pub use adapter::{ExecOutcome, PersistenceAdapter, Row};
pub use db::Database;
pub use postgres::PostgresStore;
pub use schema::{initialize_schema, SchemaReport};
pub use sqlite::SqliteStore;
