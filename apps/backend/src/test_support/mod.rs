//! Test helpers: an in-memory database with the full schema applied.
//!
//! Each call returns a fresh, isolated database. The pool is pinned to a
//! single connection because every pooled SQLite `:memory:` connection
//! would otherwise open its own empty database.

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub async fn connect_test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).min_connections(1).sqlx_logging(false);

    let conn = Database::connect(opts)
        .await
        .expect("connect to in-memory sqlite");

    migrate(&conn, MigrationCommand::Up)
        .await
        .expect("apply migrations to test database");

    conn
}
