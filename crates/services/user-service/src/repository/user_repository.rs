//! User repository implementation backed by the session factory.

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::{NewUser, User, UserChanges};

use super::queries;
use crate::infra::SessionFactory;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every write runs in its own session and is committed before the call
/// returns; a failed write leaves nothing behind.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Update name or password fields
    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    /// Mark the account disabled (sets disabled_at)
    async fn disable(&self, id: Uuid) -> AppResult<User>;

    /// Clear disabled_at
    async fn enable(&self, id: Uuid) -> AppResult<User>;

    /// Permanently delete user from database
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// List all users, oldest first
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    sessions: SessionFactory,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(sessions: SessionFactory) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        queries::find_by_id(self.sessions.connection(), id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        queries::find_by_email(self.sessions.connection(), email).await
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        self.sessions
            .scoped(move |session| Box::pin(async move { session.users().create(new_user).await }))
            .await
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        self.sessions
            .scoped(move |session| {
                Box::pin(async move { session.users().update(id, changes).await })
            })
            .await
    }

    async fn disable(&self, id: Uuid) -> AppResult<User> {
        self.sessions
            .scoped(move |session| Box::pin(async move { session.users().disable(id).await }))
            .await
    }

    async fn enable(&self, id: Uuid) -> AppResult<User> {
        self.sessions
            .scoped(move |session| Box::pin(async move { session.users().enable(id).await }))
            .await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.sessions
            .scoped(move |session| Box::pin(async move { session.users().delete(id).await }))
            .await
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        queries::list(self.sessions.connection()).await
    }
}
