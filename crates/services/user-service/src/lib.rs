//! User Service Library
//!
//! Persistence adapters for SQLite and PostgreSQL, schema initialization,
//! and the user repository and service built on top of them.

pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{UserManager, UserService};

/// Wire the repository and service onto an open database.
pub fn user_service(db: &Database) -> Arc<dyn UserService> {
    let user_repo = Arc::new(UserStore::new(db.adapter()));
    Arc::new(UserManager::new(user_repo))
}
