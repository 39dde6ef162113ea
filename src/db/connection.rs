use crate::config::ConnectionSettings;
use crate::constants::CONNECT_TIMEOUT;
use crate::db::identifier::database_identifier;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};
use std::time::Duration;
use tracing::log::LevelFilter;
use tracing::{debug, info};

/// Describe a connection target for display, without the password
pub fn display_target(settings: &ConnectionSettings, database: &str) -> String {
    format!(
        "postgres://{}@{}:{}/{}",
        settings.user, settings.host, settings.port, database
    )
}

/// Connection options for `database` on the configured server
///
/// Statements are logged at debug level only, and slow statement logging is
/// off: schema and seed files routinely contain statements that take a while.
pub fn connect_options(settings: &ConnectionSettings, database: &str) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(database)
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Off, Duration::from_secs(0))
}

/// Open a single connection with a 5-second timeout and enriched error messages
///
/// The `label` describes the database role (e.g., "administrative database")
/// and is included in error messages along with the target.
pub async fn connect_to_database(
    settings: &ConnectionSettings,
    database: &str,
    label: &str,
) -> Result<PgConnection> {
    let options = connect_options(settings, database);
    let target = display_target(settings, database);

    tokio::time::timeout(CONNECT_TIMEOUT, PgConnection::connect_with(&options))
        .await
        .map_err(|_| {
            anyhow::anyhow!(
                "Timed out after {}s connecting to {} at {}",
                CONNECT_TIMEOUT.as_secs(),
                label,
                target
            )
        })?
        .with_context(|| format!("Failed to connect to {} at {}", label, target))
}

/// Connect to the database being provisioned
pub async fn connect_to_target(settings: &ConnectionSettings) -> Result<PgConnection> {
    let conn = connect_to_database(settings, &settings.database, "target database").await?;
    info!("Conexión a la base de datos establecida");
    Ok(conn)
}

/// Outcome of [`ensure_database_exists`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseStatus {
    Created,
    AlreadyExists,
}

/// Create the target database unless the catalog already lists it
///
/// Runs on the administrative database without an explicit transaction, since
/// `CREATE DATABASE` cannot run inside one.
pub async fn ensure_database_exists(settings: &ConnectionSettings) -> Result<DatabaseStatus> {
    let quoted_name = database_identifier(&settings.database)?;

    let mut conn = connect_to_database(
        settings,
        &settings.admin_database,
        "administrative database",
    )
    .await?;

    let status = create_if_missing(&mut conn, &settings.database, &quoted_name).await;

    if let Err(e) = conn.close().await {
        debug!("Error closing administrative connection: {}", e);
    }

    let status = status?;
    match status {
        DatabaseStatus::AlreadyExists => {
            info!("La base de datos '{}' ya existe", settings.database)
        }
        DatabaseStatus::Created => {
            info!("Base de datos '{}' creada exitosamente", settings.database)
        }
    }
    Ok(status)
}

async fn create_if_missing(
    conn: &mut PgConnection,
    name: &str,
    quoted_name: &str,
) -> Result<DatabaseStatus> {
    let exists: Option<i32> =
        sqlx::query_scalar("SELECT 1 FROM pg_catalog.pg_database WHERE datname = $1")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await
            .context("Failed to query pg_database")?;

    if exists.is_some() {
        return Ok(DatabaseStatus::AlreadyExists);
    }

    sqlx::raw_sql(&format!("CREATE DATABASE {}", quoted_name))
        .execute(&mut *conn)
        .await
        .with_context(|| format!("Failed to create database {}", quoted_name))?;

    Ok(DatabaseStatus::Created)
}
