//! Schema initialization: create the `users` table and seed sample rows.

use chrono::Utc;
use sea_orm::Value;

use common::{DatabaseKind, StorageError};
use domain::{SEED_USERS, USERS_TABLE};

use super::adapter::PersistenceAdapter;

const CREATE_USERS_SQLITE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT UNIQUE NOT NULL,
        age INTEGER,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_USERS_POSTGRES: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT UNIQUE NOT NULL,
        age INTEGER,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const COUNT_USERS: &str = "SELECT COUNT(*) AS count FROM users";

/// What schema initialization did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaReport {
    /// Sample rows were inserted because the table was empty
    pub seeded: bool,
}

/// Ensure the `users` table exists and seed it when empty.
///
/// Safe to run on every start. Any failure is returned to the caller.
pub async fn initialize_schema(
    adapter: &dyn PersistenceAdapter,
) -> Result<SchemaReport, StorageError> {
    adapter
        .execute(create_table_sql(adapter.kind()), Vec::new())
        .await
        .inspect_err(|e| tracing::error!("Database initialization error: {}", e))?;
    tracing::info!(table = USERS_TABLE, "Database schema ready");

    let count = adapter
        .query_one(COUNT_USERS, Vec::new())
        .await?
        .map(|row| row.try_get::<i64>("", "count"))
        .transpose()?
        .unwrap_or(0);

    if count > 0 {
        return Ok(SchemaReport { seeded: false });
    }

    let (sql, params) = seed_statement();
    let outcome = adapter
        .execute(&sql, params)
        .await
        .inspect_err(|e| tracing::error!("Error inserting sample data: {}", e))?;
    tracing::info!(rows = outcome.affected, "Sample data inserted");

    Ok(SchemaReport { seeded: true })
}

fn create_table_sql(kind: DatabaseKind) -> &'static str {
    match kind {
        DatabaseKind::Sqlite => CREATE_USERS_SQLITE,
        DatabaseKind::Postgres => CREATE_USERS_POSTGRES,
    }
}

/// Multi-row insert of the seed users sharing one timestamp.
fn seed_statement() -> (String, Vec<Value>) {
    let now = Utc::now();
    let mut params: Vec<Value> = vec![now.into()];
    let mut rows = Vec::with_capacity(SEED_USERS.len());

    for (name, email, age) in SEED_USERS {
        let base = params.len();
        params.push((*name).into());
        params.push((*email).into());
        params.push((*age).into());
        rows.push(format!("(${}, ${}, ${}, $1, $1)", base + 1, base + 2, base + 3));
    }

    let sql = format!(
        "INSERT INTO users (name, email, age, created_at, updated_at) VALUES {}",
        rows.join(", ")
    );
    (sql, params)
}
