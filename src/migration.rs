//! Create entity tables from their definitions, referenced tables first.

use crate::error::AppError;
use crate::model::all_definitions;
use crate::sql::create_table;
use sqlx::AnyPool;

/// Idempotent: every statement is `CREATE TABLE IF NOT EXISTS`.
pub async fn apply_migrations(pool: &AnyPool) -> Result<(), AppError> {
    for def in all_definitions() {
        let ddl = create_table(def);
        tracing::debug!(sql = %ddl, "migration");
        sqlx::query(&ddl).execute(pool).await?;
    }
    tracing::info!("schema up to date");
    Ok(())
}
