//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MSG_EMAIL_EMPTY, MSG_NAME_EMAIL_REQUIRED, MSG_NAME_EMPTY};
use crate::error::{DomainError, DomainResult};

/// Server-assigned user identifier
pub type UserId = i64;

/// Parse a path segment into a user id.
///
/// Only a plain run of ASCII digits is an id. Anything else (signs,
/// whitespace, decimals) yields `None`; callers treat that the same as an id
/// with no matching row.
pub fn parse_user_id(raw: &str) -> Option<UserId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// User domain entity, one row of the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Unique user identifier
    pub id: UserId,
    /// User display name
    pub name: String,
    /// User email address (unique, exact match)
    pub email: String,
    /// Optional age
    pub age: Option<i32>,
    /// Creation timestamp, never modified
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check whether `email` is exactly the stored address
    pub fn has_email(&self, email: &str) -> bool {
        self.email == email
    }
}

/// User creation data transfer object.
///
/// Fields are optional at the wire level so that a missing name or email is
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl CreateUser {
    /// Check required fields and produce an insertable user
    pub fn validate(self) -> DomainResult<NewUser> {
        match (self.name, self.email) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => Ok(NewUser {
                name,
                email,
                age: self.age,
            }),
            _ => Err(DomainError::validation(MSG_NAME_EMAIL_REQUIRED)),
        }
    }
}

/// A validated user ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

/// User update data transfer object.
///
/// `None` means "keep the current value"; an explicit JSON `null` is treated
/// the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl UpdateUser {
    /// Supplied text fields must not be empty
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.as_deref().is_some_and(str::is_empty) {
            return Err(DomainError::validation(MSG_NAME_EMPTY));
        }
        if self.email.as_deref().is_some_and(str::is_empty) {
            return Err(DomainError::validation(MSG_EMAIL_EMPTY));
        }
        Ok(())
    }

    /// True when no field was supplied (only `updated_at` will change)
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }

    /// The new email if it differs from the user's current one
    pub fn email_change<'a>(&'a self, current: &User) -> Option<&'a str> {
        self.email
            .as_deref()
            .filter(|email| !current.has_email(email))
    }
}
