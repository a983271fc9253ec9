//! Repository layer for data access.

pub mod entities;
mod queries;
mod tx_user_repository;
mod user_repository;

pub use tx_user_repository::TxUserRepository;
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Defaults applied when a new account row is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountDefaults {
    /// Stamp `disabled_at` with the creation instant.
    ///
    /// Reproduces the legacy schema, where every new account looked
    /// disabled. Off unless explicitly enabled.
    pub stamp_disabled_at_on_create: bool,
}

impl AccountDefaults {
    pub fn legacy() -> Self {
        Self {
            stamp_disabled_at_on_create: true,
        }
    }
}
