//! Pool construction. PostgreSQL and SQLite URLs both go through the Any driver.

use crate::error::{AppError, ConfigError};
use crate::settings::Settings;
use sqlx::any::AnyPoolOptions;
use sqlx::{AnyPool, ConnectOptions};
use std::str::FromStr;
use std::time::Duration;

/// Connect using `settings`, creating the PostgreSQL database first if it is missing.
pub async fn connect(settings: &Settings) -> Result<AnyPool, AppError> {
    if is_postgres(&settings.database_url) {
        ensure_database_exists(&settings.database_url).await?;
    }
    connect_url(&settings.database_url, settings.max_connections).await
}

/// Open a pool on `database_url`. In-memory SQLite keeps a single connection alive
/// for the pool's lifetime, since each connection would otherwise see its own database.
pub async fn connect_url(database_url: &str, max_connections: u32) -> Result<AnyPool, AppError> {
    sqlx::any::install_default_drivers();
    let options = if database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory") {
        AnyPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        AnyPoolOptions::new().max_connections(max_connections)
    };
    let pool = options.connect(database_url).await?;
    tracing::info!(backend = backend_name(database_url), "database pool ready");
    Ok(pool)
}

fn is_postgres(url: &str) -> bool {
    url.starts_with("postgres://") || url.starts_with("postgresql://")
}

fn backend_name(url: &str) -> &'static str {
    if is_postgres(url) {
        "postgres"
    } else if url.starts_with("sqlite:") {
        "sqlite"
    } else {
        "other"
    }
}

pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::Invalid {
            key: "DATABASE_URL",
            value: e.to_string(),
        })?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await
        .map_err(AppError::Db)?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url.rfind('/').ok_or_else(|| ConfigError::Invalid {
        key: "DATABASE_URL",
        value: "no database path".into(),
    })? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
