//! Session factory integration tests.
//!
//! Run against an in-memory SQLite database migrated with the real
//! migrator, so transactions and constraints behave as in production.

mod support;

use common::{AppError, DatabaseConfig};
use tokio_test::assert_ok;
use user_service_lib::infra::SessionFactory;

use support::{memory_config, new_user, sessions};

// =============================================================================
// Connecting
// =============================================================================

#[tokio::test]
async fn test_connect_without_url_is_connection_error() {
    let result = SessionFactory::connect(&DatabaseConfig::default()).await;

    assert!(matches!(result, Err(AppError::Connection(_))));
}

#[tokio::test]
async fn test_connect_with_unsupported_url_is_connection_error() {
    let result = SessionFactory::connect(&DatabaseConfig::new("nope://localhost/app")).await;

    let err = result.err().expect("unsupported scheme should not connect");
    assert!(err.is_connection());
    assert_eq!(err.code(), "CONNECTION_ERROR");
}

#[tokio::test]
async fn test_ping_succeeds_on_open_pool() {
    let sessions = sessions().await;

    assert_ok!(sessions.ping().await);
}

#[tokio::test]
async fn test_migration_status_reports_applied() {
    let sessions = sessions().await;

    let status = sessions.migration_status().await.unwrap();

    assert!(!status.is_empty());
    assert!(status.iter().all(|(_, applied)| *applied));
    assert!(status[0].0.contains("create_users_table"));
}

#[tokio::test]
async fn test_migration_status_on_unmigrated_database_reports_pending() {
    let sessions = SessionFactory::connect(&memory_config()).await.unwrap();

    let status = sessions.migration_status().await.unwrap();

    assert!(!status.is_empty());
    assert!(status.iter().all(|(_, applied)| !*applied));
}

#[tokio::test]
async fn test_migration_status_after_rollback_reports_pending() {
    let sessions = sessions().await;

    sessions.rollback_migration().await.unwrap();
    let status = sessions.migration_status().await.unwrap();

    assert!(status.iter().all(|(_, applied)| !*applied));
}

// =============================================================================
// Manual commit
// =============================================================================

#[tokio::test]
async fn test_closed_session_leaves_no_changes() {
    let sessions = sessions().await;

    let session = sessions.session().await.unwrap();
    let created = session.users().create(new_user("a@x.com")).await.unwrap();
    // Visible inside its own unit of work
    assert!(session.users().find_by_id(created.id).await.unwrap().is_some());
    session.close().await.unwrap();

    let session = sessions.session().await.unwrap();
    assert!(session.users().find_by_id(created.id).await.unwrap().is_none());
    assert!(session.users().list().await.unwrap().is_empty());
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_dropped_session_leaves_no_changes() {
    let sessions = sessions().await;

    {
        let session = sessions.session().await.unwrap();
        session.users().create(new_user("a@x.com")).await.unwrap();
    }

    let session = sessions.session().await.unwrap();
    assert!(session
        .users()
        .find_by_email("a@x.com")
        .await
        .unwrap()
        .is_none());
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_committed_session_persists_changes() {
    let sessions = sessions().await;

    let session = sessions.session().await.unwrap();
    let created = session.users().create(new_user("a@x.com")).await.unwrap();
    session.commit().await.unwrap();

    let session = sessions.session().await.unwrap();
    let found = session.users().find_by_id(created.id).await.unwrap();
    session.close().await.unwrap();

    assert_eq!(found, Some(created));
}

// =============================================================================
// Scoped sessions
// =============================================================================

#[tokio::test]
async fn test_scoped_commits_on_success() {
    let sessions = sessions().await;

    let created = sessions
        .scoped(|session| {
            Box::pin(async move { session.users().create(new_user("a@x.com")).await })
        })
        .await
        .unwrap();

    let session = sessions.session().await.unwrap();
    assert!(session.users().find_by_id(created.id).await.unwrap().is_some());
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_scoped_rolls_back_on_error() {
    let sessions = sessions().await;

    let result: Result<(), AppError> = sessions
        .scoped(|session| {
            Box::pin(async move {
                session.users().create(new_user("a@x.com")).await?;
                Err(AppError::validation("abort"))
            })
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(ref m)) if m == "abort"));

    let session = sessions.session().await.unwrap();
    assert!(session.users().list().await.unwrap().is_empty());
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_scoped_duplicate_rolls_back_whole_unit() {
    let sessions = sessions().await;

    let result = sessions
        .scoped(|session| {
            Box::pin(async move {
                session.users().create(new_user("b@x.com")).await?;
                session.users().create(new_user("a@x.com")).await?;
                session.users().create(new_user("a@x.com")).await
            })
        })
        .await;

    assert!(matches!(result, Err(AppError::DuplicateEmail(_))));

    let session = sessions.session().await.unwrap();
    assert!(session.users().list().await.unwrap().is_empty());
    session.close().await.unwrap();
}
