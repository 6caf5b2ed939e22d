use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tokio::sync::oneshot;
use tracing::debug;

use crate::config::DatabaseConfig;

pub mod migrations;
pub mod models;

/// Connects to the database and starts applying migrations in the background.
///
/// The receiver resolves once every pending migration ran (or one failed), so
/// the caller can keep a liveness endpoint up in the meantime.
pub async fn setup_database(
    db_config: &DatabaseConfig,
) -> Result<(DatabaseConnection, oneshot::Receiver<Result<(), DbErr>>), DbErr> {
    let connection = setup_database_connection(db_config).await?;
    let migrations_connection = connection.clone();

    let (sender, receiver) = oneshot::channel();

    tokio::spawn(async move {
        let migration_result = migrations::Migrator::up(&migrations_connection, None).await;
        let _ = sender.send(migration_result);
    });

    Ok((connection, receiver))
}

pub async fn setup_database_connection(
    db_config: &DatabaseConfig,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(db_config.url.clone());

    options.sqlx_logging(false); // Disable SQL query logging to reduce noise
    options.max_connections(db_config.pool_size);

    debug!("Connecting to database at: {}", redact_url(&db_config.url));

    sea_orm::Database::connect(options).await
}

/// Hides the password part of a connection URL before it reaches the logs.
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let credentials = &url[scheme_end + 3..at];
            match credentials.split_once(':') {
                Some((user, _)) => format!("{}{user}:***{}", &url[..scheme_end + 3], &url[at..]),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}
