//! User service - Handles account use cases.
//!
//! SOLID (SRP): Handles user-related use cases only.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{NewUser, User, UserChanges};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new account
    async fn register_user(&self, new_user: NewUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Get user by email
    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Update name or password
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    /// Disable an account
    async fn disable_user(&self, id: Uuid) -> AppResult<User>;

    /// Re-enable a disabled account
    async fn enable_user(&self, id: Uuid) -> AppResult<User>;

    /// Permanently delete an account
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
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
}

#[async_trait]
impl UserService for UserManager {
    async fn register_user(&self, new_user: NewUser) -> AppResult<User> {
        new_user.validate()?;

        // The unique index still guards against a concurrent registration
        if self.repo.find_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::duplicate_email(new_user.email));
        }

        self.repo.create(new_user).await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.repo.find_by_email(email).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        if changes.is_empty() {
            return Err(AppError::validation("No changes supplied"));
        }
        changes.validate()?;

        self.repo.update(id, changes).await
    }

    async fn disable_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.disable(id).await
    }

    async fn enable_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.enable(id).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await
    }
}
