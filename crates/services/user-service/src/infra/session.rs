//! Unit-of-work sessions.
//!
//! A session wraps one database transaction. Nothing it writes becomes
//! visible to other sessions until `commit` is called; `rollback`, `close`
//! and dropping the session all discard pending changes.

use sea_orm::DatabaseTransaction;

use common::{AppError, AppResult};

use crate::repository::{AccountDefaults, TxUserRepository};

/// One unit of work against the database.
pub struct Session {
    txn: DatabaseTransaction,
    defaults: AccountDefaults,
}

impl Session {
    pub(crate) fn new(txn: DatabaseTransaction, defaults: AccountDefaults) -> Self {
        Self { txn, defaults }
    }

    /// Get user repository for this session
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository::new(&self.txn, self.defaults)
    }

    /// Persist every change made in this session.
    pub async fn commit(self) -> AppResult<()> {
        self.txn.commit().await.map_err(AppError::from)?;
        tracing::debug!("Session committed");
        Ok(())
    }

    /// Discard every change made in this session.
    pub async fn rollback(self) -> AppResult<()> {
        self.txn.rollback().await.map_err(AppError::from)?;
        tracing::debug!("Session rolled back");
        Ok(())
    }

    /// Release the session without committing.
    pub async fn close(self) -> AppResult<()> {
        self.rollback().await
    }
}
