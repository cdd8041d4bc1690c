//! Process-wide service handles.

use std::time::Duration;

use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::APP_CONFIG;

pub static DATABASE_CONNECTION: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn get_database_connection() -> &'static DatabaseConnection {
    if let Some(connection) = DATABASE_CONNECTION.get() {
        return connection;
    }

    let mut options = ConnectOptions::new(APP_CONFIG.database_url.clone());
    options
        .connect_timeout(Duration::from_secs(APP_CONFIG.database_timeout_seconds))
        .acquire_timeout(Duration::from_secs(APP_CONFIG.database_timeout_seconds))
        .sqlx_logging(APP_CONFIG.debug);

    let connection = Database::connect(options)
        .await
        .expect("Failed to connect to database");

    if DATABASE_CONNECTION.set(connection).is_err() {
        tracing::warn!("DATABASE_CONNECTION was already initialized");
    }

    DATABASE_CONNECTION
        .get()
        .expect("DATABASE_CONNECTION not set")
}
