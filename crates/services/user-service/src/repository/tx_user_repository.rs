//! Session-bound user repository.

use sea_orm::DatabaseTransaction;
use uuid::Uuid;

use common::AppResult;
use domain::{NewUser, User, UserChanges};

use super::{queries, AccountDefaults};

/// Transaction-aware user repository.
///
/// Executes all operations within the owning session's transaction, so
/// nothing is visible elsewhere until the session commits.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
    defaults: AccountDefaults,
}

impl<'a> TxUserRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction, defaults: AccountDefaults) -> Self {
        Self { txn, defaults }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        queries::find_by_id(self.txn, id).await
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        queries::find_by_email(self.txn, email).await
    }

    /// List users, oldest first
    pub async fn list(&self) -> AppResult<Vec<User>> {
        queries::list(self.txn).await
    }

    /// Insert a new user, generating any identifiers left unset
    pub async fn create(&self, new_user: NewUser) -> AppResult<User> {
        queries::create(self.txn, new_user, self.defaults).await
    }

    pub async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        queries::update(self.txn, id, changes).await
    }

    pub async fn disable(&self, id: Uuid) -> AppResult<User> {
        queries::set_disabled(self.txn, id, Some(chrono::Utc::now())).await
    }

    pub async fn enable(&self, id: Uuid) -> AppResult<User> {
        queries::set_disabled(self.txn, id, None).await
    }

    /// Permanently delete user from database
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        queries::delete(self.txn, id).await
    }
}
