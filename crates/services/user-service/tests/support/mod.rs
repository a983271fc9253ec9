//! Shared helpers for the database-backed integration tests.

#![allow(dead_code)]

use common::DatabaseConfig;
use domain::NewUser;
use user_service_lib::infra::SessionFactory;

/// Single-connection config: every in-memory SQLite connection is its own
/// database, so the pool must never open a second one.
pub fn memory_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        pre_ping: true,
        sqlx_logging: false,
    }
}

/// Fresh, fully migrated database.
pub async fn sessions() -> SessionFactory {
    SessionFactory::connect_and_migrate(&memory_config())
        .await
        .expect("in-memory database should open and migrate")
}

pub fn new_user(email: &str) -> NewUser {
    NewUser::new(email, "secret", "A", "B")
}
