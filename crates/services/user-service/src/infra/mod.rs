//! Infrastructure layer - database pool, sessions and migrations.

mod db;
pub mod migrations;
mod session;

pub use db::SessionFactory;
pub use migrations::Migrator;
pub use session::Session;
