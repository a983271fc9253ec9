//! User Service Library
//!
//! Account persistence: the `users` schema, an explicitly owned session
//! factory handing out unit-of-work sessions, repositories and the
//! account use cases built on them.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{NewUser, UserChanges, UserResponse};

use crate::config::UserServiceConfig;
use crate::infra::SessionFactory;
use crate::repository::UserStore;
use crate::service::{UserManager, UserService};

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Account operation requested from the command line.
#[derive(Debug, Clone)]
pub enum UserAction {
    Create(NewUser),
    Get(Uuid),
    Find(String),
    List,
    Update(Uuid, UserChanges),
    Disable(Uuid),
    Enable(Uuid),
    Delete(Uuid),
}

/// Open the session factory described by `config`.
pub async fn connect(config: &UserServiceConfig) -> AppResult<SessionFactory> {
    let factory = SessionFactory::connect(&config.database).await?;
    Ok(factory.with_defaults(config.account_defaults()))
}

/// Build the account service over a session factory.
pub fn user_service(sessions: SessionFactory) -> Arc<dyn UserService> {
    let repo = Arc::new(UserStore::new(sessions));
    Arc::new(UserManager::new(repo))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(config: &UserServiceConfig, action: MigrateAction) -> AppResult<()> {
    let db = connect(config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Check the configured database answers.
pub async fn ping(config: &UserServiceConfig) -> AppResult<()> {
    let db = connect(config).await?;
    db.ping().await?;
    info!("Database is reachable");
    Ok(())
}

/// Execute one account action and render the outcome as JSON.
pub async fn execute(service: &dyn UserService, action: UserAction) -> AppResult<Value> {
    match action {
        UserAction::Create(new_user) => {
            render(UserResponse::from(service.register_user(new_user).await?))
        }
        UserAction::Get(id) => render(UserResponse::from(service.get_user(id).await?)),
        UserAction::Find(email) => {
            render(UserResponse::from(service.get_user_by_email(&email).await?))
        }
        UserAction::List => {
            let users: Vec<UserResponse> = service
                .list_users()
                .await?
                .into_iter()
                .map(UserResponse::from)
                .collect();
            render(users)
        }
        UserAction::Update(id, changes) => {
            render(UserResponse::from(service.update_user(id, changes).await?))
        }
        UserAction::Disable(id) => render(UserResponse::from(service.disable_user(id).await?)),
        UserAction::Enable(id) => render(UserResponse::from(service.enable_user(id).await?)),
        UserAction::Delete(id) => {
            service.delete_user(id).await?;
            Ok(serde_json::json!({ "deleted": id }))
        }
    }
}

fn render<T: serde::Serialize>(value: T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::internal(e.to_string()))
}

/// One-line failure report for the operator; storage internals stay in the log.
pub fn failure_message(err: &AppError) -> String {
    format!("{}: {}", err.code(), err.user_message())
}

/// Process exit status for a failed command. Connection failures get their
/// own status so scripts can retry them.
pub fn exit_code(err: &AppError) -> i32 {
    if err.is_connection() {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_hides_database_details() {
        let err = AppError::from(sea_orm::DbErr::Custom("relation users is locked".into()));

        let message = failure_message(&err);

        assert_eq!(message, "DATABASE_ERROR: A database error occurred");
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn failure_message_keeps_actionable_errors() {
        let err = AppError::duplicate_email("a@x.com");

        assert_eq!(
            failure_message(&err),
            "DUPLICATE_EMAIL: Email a@x.com is already registered"
        );
    }

    #[test]
    fn connection_failures_use_distinct_exit_code() {
        let err = AppError::connection("database url is not configured");

        assert_eq!(exit_code(&err), 2);
        assert!(failure_message(&err).starts_with("CONNECTION_ERROR: "));
    }
}
