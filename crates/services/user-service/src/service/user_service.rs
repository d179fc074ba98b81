//! User service - Handles user-related business logic.
//!
//! Owns validation and the email uniqueness rule. Every call reads the table
//! fresh; nothing is kept between calls.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{CreateUser, UpdateUser, User, UserId, ENTITY_USER, FIELD_EMAIL};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// All users ordered by creation time, newest first
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: UserId) -> AppResult<User>;

    /// Create a new user after checking required fields and email uniqueness
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Partially update a user; unspecified fields keep their value
    async fn update_user(&self, id: UserId, changes: UpdateUser) -> AppResult<User>;

    /// Permanently delete a user
    async fn delete_user(&self, id: UserId) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn existing(&self, id: UserId) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found(ENTITY_USER)
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn get_user(&self, id: UserId) -> AppResult<User> {
        self.existing(id).await
    }

    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let new_user = input.validate()?;

        // Check if email already exists
        if self.repo.find_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::conflict(FIELD_EMAIL));
        }

        let id = self.repo.insert(new_user, Utc::now()).await?;
        tracing::info!(user_id = id, "User created");

        self.existing(id).await
    }

    async fn update_user(&self, id: UserId, changes: UpdateUser) -> AppResult<User> {
        let current = self.existing(id).await?;
        changes.validate()?;

        if let Some(email) = changes.email_change(&current) {
            if self.repo.email_taken_by_other(email, id).await? {
                return Err(AppError::conflict(FIELD_EMAIL));
            }
        }

        // Never move updated_at backwards, even if the clock does
        let now = Utc::now().max(current.updated_at);
        if self.repo.update(id, &changes, now).await? == 0 {
            return Err(AppError::not_found(ENTITY_USER));
        }
        tracing::info!(user_id = id, "User updated");

        self.existing(id).await
    }

    async fn delete_user(&self, id: UserId) -> AppResult<()> {
        self.existing(id).await?;

        if self.repo.delete(id).await? == 0 {
            return Err(AppError::not_found(ENTITY_USER));
        }
        tracing::info!(user_id = id, "User deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mockall::predicate::{always, eq};

    use common::StorageError;
    use domain::NewUser;

    use crate::repository::MockUserRepository;

    fn create_test_user(id: UserId) -> User {
        let now = Utc::now();
        User {
            id,
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            age: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn ada() -> CreateUser {
        CreateUser {
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            age: None,
        }
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(create_test_user(id))));

        let service = UserManager::new(Arc::new(repo));
        let user = service.get_user(1).await.unwrap();

        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let err = service.get_user(99).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_list_users_empty_is_ok() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().returning(|| Ok(vec![]));

        let service = UserManager::new(Arc::new(repo));
        assert!(service.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_users_propagates_storage_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|| Err(StorageError::new("database is locked").into()));

        let service = UserManager::new(Arc::new(repo));
        let err = service.list_users().await.unwrap_err();

        assert!(matches!(err, AppError::Storage(ref e) if e.message() == "database is locked"));
    }

    #[tokio::test]
    async fn test_create_user_requires_name_and_email() {
        // No repository calls expected
        let repo = MockUserRepository::new();
        let service = UserManager::new(Arc::new(repo));

        let input = CreateUser {
            email: None,
            ..ada()
        };
        let err = service.create_user(input).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Name and email are required");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("ada@example.com"))
            .returning(|_| Ok(Some(create_test_user(1))));
        repo.expect_insert().never();

        let service = UserManager::new(Arc::new(repo));
        let err = service.create_user(ada()).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), "Email already exists");
    }

    #[tokio::test]
    async fn test_create_user_rereads_persisted_row() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|user: &NewUser, _| user.email == "ada@example.com" && user.age.is_none())
            .times(1)
            .returning(|_, _| Ok(1));
        repo.expect_find_by_id()
            .with(eq(1))
            .times(1)
            .returning(|id| Ok(Some(create_test_user(id))));

        let service = UserManager::new(Arc::new(repo));
        let user = service.create_user(ada()).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let err = service
            .update_user(5, UpdateUser::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_user_email_taken_by_other() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(create_test_user(id))));
        repo.expect_email_taken_by_other()
            .with(eq("grace@example.com"), eq(1))
            .returning(|_, _| Ok(true));
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let changes = UpdateUser {
            email: Some("grace@example.com".to_string()),
            ..Default::default()
        };
        let err = service.update_user(1, changes).await.unwrap_err();

        assert_eq!(err.to_string(), "Email already exists");
    }

    #[tokio::test]
    async fn test_update_user_same_email_skips_conflict_check() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(create_test_user(id))));
        repo.expect_email_taken_by_other().never();
        repo.expect_update()
            .with(eq(1), always(), always())
            .times(1)
            .returning(|_, _, _| Ok(1));

        let service = UserManager::new(Arc::new(repo));
        let changes = UpdateUser {
            email: Some("ada@example.com".to_string()),
            age: Some(37),
            ..Default::default()
        };

        assert!(service.update_user(1, changes).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_timestamp_never_goes_backwards() {
        let future = Utc::now() + Duration::hours(1);

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(move |id| {
            let mut user = create_test_user(id);
            user.updated_at = future;
            Ok(Some(user))
        });
        repo.expect_update()
            .withf(move |_, changes: &UpdateUser, now| changes.is_empty() && *now >= future)
            .times(1)
            .returning(|_, _, _| Ok(1));

        let service = UserManager::new(Arc::new(repo));
        assert!(service.update_user(1, UpdateUser::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_rejects_empty_name() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(create_test_user(id))));
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let changes = UpdateUser {
            name: Some(String::new()),
            ..Default::default()
        };
        let err = service.update_user(1, changes).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(create_test_user(id))));
        repo.expect_delete().with(eq(3)).times(1).returning(|_| Ok(1));

        let service = UserManager::new(Arc::new(repo));
        assert!(service.delete_user(3).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let service = UserManager::new(Arc::new(repo));
        let err = service.delete_user(3).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
