//! User repository: parameterized SQL over the persistence adapter.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{prelude::DateTimeUtc, FromQueryResult, Value};

use common::{AppError, AppResult, StorageError};
use domain::{NewUser, UpdateUser, User, UserId};

use crate::infra::{PersistenceAdapter, Row};

#[cfg(test)]
use mockall::automock;

const SELECT_USERS: &str = "SELECT id, name, email, age, created_at, updated_at FROM users";

/// User repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, newest first
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find user by exact email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Whether a user other than `id` already holds `email`
    async fn email_taken_by_other(&self, email: &str, id: UserId) -> AppResult<bool>;

    /// Insert a user stamped with `now`, returning the generated id
    async fn insert(&self, user: NewUser, now: DateTime<Utc>) -> AppResult<UserId>;

    /// Apply the supplied fields and set `updated_at`, returning rows affected
    async fn update(&self, id: UserId, changes: &UpdateUser, now: DateTime<Utc>)
        -> AppResult<u64>;

    /// Permanently delete a user, returning rows affected
    async fn delete(&self, id: UserId) -> AppResult<u64>;
}

/// Row shape of the `users` table
#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    age: Option<i32>,
    created_at: DateTimeUtc,
    updated_at: DateTimeUtc,
}

/// Convert database row to domain entity
impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            age: row.age,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn to_user(row: &Row) -> Result<User, StorageError> {
    Ok(UserRow::from_query_result(row, "")?.into())
}

/// Concrete implementation of UserRepository over a persistence adapter
pub struct UserStore {
    db: Arc<dyn PersistenceAdapter>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<dyn PersistenceAdapter>) -> Self {
        Self { db }
    }

    async fn fetch_one(&self, sql: &str, params: Vec<Value>) -> AppResult<Option<User>> {
        let row = self.db.query_one(sql, params).await?;
        Ok(row.as_ref().map(to_user).transpose()?)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        let sql = format!("{} ORDER BY created_at DESC, id DESC", SELECT_USERS);
        let rows = self.db.query_many(&sql, Vec::new()).await?;

        rows.iter()
            .map(|row| to_user(row).map_err(AppError::from))
            .collect()
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let sql = format!("{} WHERE id = $1", SELECT_USERS);
        self.fetch_one(&sql, vec![id.into()]).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let sql = format!("{} WHERE email = $1", SELECT_USERS);
        self.fetch_one(&sql, vec![email.into()]).await
    }

    async fn email_taken_by_other(&self, email: &str, id: UserId) -> AppResult<bool> {
        let row = self
            .db
            .query_one(
                "SELECT id FROM users WHERE email = $1 AND id != $2",
                vec![email.into(), id.into()],
            )
            .await?;
        Ok(row.is_some())
    }

    async fn insert(&self, user: NewUser, now: DateTime<Utc>) -> AppResult<UserId> {
        let outcome = self
            .db
            .execute(
                "INSERT INTO users (name, email, age, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $4)",
                vec![user.name.into(), user.email.into(), user.age.into(), now.into()],
            )
            .await?;

        outcome
            .inserted_id
            .ok_or_else(|| AppError::internal("Insert did not report a generated id"))
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UpdateUser,
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        let (sql, params) = update_statement(id, changes, now);
        let outcome = self.db.execute(&sql, params).await?;
        Ok(outcome.affected)
    }

    async fn delete(&self, id: UserId) -> AppResult<u64> {
        let outcome = self
            .db
            .execute("DELETE FROM users WHERE id = $1", vec![id.into()])
            .await?;
        Ok(outcome.affected)
    }
}

/// Translate the supplied fields into an `UPDATE` with a fixed column order.
///
/// `updated_at` is always assigned, so an update with no fields still
/// touches the row.
fn update_statement(id: UserId, changes: &UpdateUser, now: DateTime<Utc>) -> (String, Vec<Value>) {
    let mut assignments = Vec::with_capacity(4);
    let mut params: Vec<Value> = Vec::with_capacity(5);

    if let Some(name) = &changes.name {
        params.push(name.clone().into());
        assignments.push(format!("name = ${}", params.len()));
    }
    if let Some(email) = &changes.email {
        params.push(email.clone().into());
        assignments.push(format!("email = ${}", params.len()));
    }
    if let Some(age) = changes.age {
        params.push(age.into());
        assignments.push(format!("age = ${}", params.len()));
    }
    params.push(now.into());
    assignments.push(format!("updated_at = ${}", params.len()));

    params.push(id.into());
    let sql = format!(
        "UPDATE users SET {} WHERE id = ${}",
        assignments.join(", "),
        params.len()
    );

    (sql, params)
}
