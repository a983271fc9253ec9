//! Database connection pool and session factory.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;

use common::{AppError, AppResult, DatabaseConfig};

use super::migrations::Migrator;
use super::session::Session;
use crate::repository::AccountDefaults;

/// Bookkeeping table maintained by the migrator
const MIGRATIONS_TABLE: &str = "seaql_migrations";

/// Session factory bound to one explicitly owned connection pool.
///
/// Cloning is cheap and shares the pool. Every session handed out is a
/// single database transaction that must be committed explicitly.
#[derive(Clone)]
pub struct SessionFactory {
    connection: DatabaseConnection,
    defaults: AccountDefaults,
}

impl SessionFactory {
    /// Open the pool described by `config`.
    ///
    /// A missing connection string is reported as a connection error
    /// rather than attempting to connect with an empty URL.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        if !config.has_url() {
            return Err(AppError::connection("database url is not configured"));
        }

        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .test_before_acquire(config.pre_ping)
            .sqlx_logging(config.sqlx_logging);

        let connection = Database::connect(options)
            .await
            .map_err(|e| AppError::connection(e.to_string()))?;

        tracing::info!(
            max_connections = config.max_connections,
            pre_ping = config.pre_ping,
            "Database pool opened"
        );

        Ok(Self::from_connection(connection))
    }

    /// Open the pool and apply pending migrations.
    pub async fn connect_and_migrate(config: &DatabaseConfig) -> AppResult<Self> {
        let factory = Self::connect(config).await?;
        factory.run_migrations().await?;
        tracing::info!("Database connected and migrations applied");
        Ok(factory)
    }

    /// Wrap an already opened connection.
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self {
            connection,
            defaults: AccountDefaults::default(),
        }
    }

    /// Override the defaults applied to newly created accounts.
    pub fn with_defaults(mut self, defaults: AccountDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Get a reference to the pooled connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Begin a new unit of work.
    pub async fn session(&self) -> AppResult<Session> {
        let txn = self.connection.begin().await.map_err(AppError::from)?;
        tracing::debug!("Session opened");
        Ok(Session::new(txn, self.defaults))
    }

    /// Run `f` inside a session.
    ///
    /// The session is committed when `f` succeeds and rolled back when it
    /// fails. A failed rollback is logged; the caller still gets the
    /// original error.
    pub async fn scoped<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                &'a Session,
            ) -> Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>
            + Send,
        T: Send,
    {
        let session = self.session().await?;

        let result = f(&session).await;

        match result {
            Ok(value) => {
                session.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = session.rollback().await {
                    tracing::error!("Session rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.connection, None).await?;
        Ok(())
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> AppResult<()> {
        Migrator::down(&self.connection, Some(1)).await?;
        Ok(())
    }

    /// Get migration status (list all migrations with applied status).
    ///
    /// A database without the migrations table reports every migration as
    /// pending; any other read failure is returned.
    pub async fn migration_status(&self) -> AppResult<Vec<(String, bool)>> {
        use sea_orm::{EntityTrait, QueryOrder};
        use sea_orm_migration::{seaql_migrations, SchemaManager};

        let manager = SchemaManager::new(&self.connection);
        let applied: HashSet<String> = if manager.has_table(MIGRATIONS_TABLE).await? {
            seaql_migrations::Entity::find()
                .order_by_asc(seaql_migrations::Column::Version)
                .all(&self.connection)
                .await?
                .into_iter()
                .map(|m| m.version)
                .collect()
        } else {
            HashSet::new()
        };

        // Map all defined migrations with their applied status
        let migrations: Vec<(String, bool)> = Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect();

        Ok(migrations)
    }

    /// Reset database and run all migrations fresh.
    pub async fn fresh_migrations(&self) -> AppResult<()> {
        Migrator::fresh(&self.connection).await?;
        Ok(())
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> AppResult<()> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await
            .map_err(|e| AppError::connection(e.to_string()))?;
        Ok(())
    }
}
