//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The `users` resource is the only entity; everything else in the workspace
//! moves these types between HTTP and SQL.

pub mod constants;
pub mod error;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use user::{parse_user_id, CreateUser, NewUser, UpdateUser, User, UserId};
