//! Pass-through persistence facade over the sqlx pool. One statement per call.

use crate::error::AppError;
use crate::model::{ColumnType, Entity, EntityDef};
use crate::sql::{self, QueryBuf, SqlValue};
use serde_json::{Map, Value};
use sqlx::any::{Any, AnyArguments, AnyRow};
use sqlx::AnyPool;
use sqlx::query::Query;

#[derive(Clone)]
pub struct DataManager {
    pool: AnyPool,
}

impl DataManager {
    pub fn new(pool: AnyPool) -> Self {
        DataManager { pool }
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Fetch one record by id.
    pub async fn get<E: Entity>(&self, id: &str) -> Result<Option<E>, AppError> {
        let def = E::def();
        let q = sql::select_by_id(def, id);
        let row = self.fetch_optional(&q).await?;
        row.map(|r| decode::<E>(def, &r)).transpose()
    }

    /// Every record, oldest first.
    pub async fn get_all<E: Entity>(&self) -> Result<Vec<E>, AppError> {
        let def = E::def();
        let q = sql::select_all(def);
        self.fetch_all(&q).await?.iter().map(|r| decode::<E>(def, r)).collect()
    }

    /// Records whose `column` equals `value`.
    pub async fn find_by<E: Entity>(&self, column: &str, value: &Value) -> Result<Vec<E>, AppError> {
        let def = E::def();
        let col = def
            .column(column)
            .ok_or_else(|| AppError::Internal(format!("unknown column {}", column)))?;
        let q = sql::select_where(def, col, SqlValue::from_json(value, col)?);
        self.fetch_all(&q).await?.iter().map(|r| decode::<E>(def, r)).collect()
    }

    /// Whether `table` holds a row with this id.
    pub async fn exists(&self, table: &str, id: &str) -> Result<bool, AppError> {
        let q = sql::select_exists(table, id);
        Ok(self.fetch_optional(&q).await?.is_some())
    }

    pub async fn save<E: Entity>(&self, record: &E) -> Result<(), AppError> {
        let def = E::def();
        let row = to_map(record)?;
        let q = sql::insert(def, &row)?;
        self.execute(&q).await.map_err(|e| AppError::from_write(e, def.label))?;
        Ok(())
    }

    /// Refreshes `update_time`, then writes every mutable column.
    pub async fn update<E: Entity>(&self, record: &mut E) -> Result<(), AppError> {
        let def = E::def();
        record.base_mut().touch();
        let row = to_map(record)?;
        let q = sql::update(def, record.id(), &row)?;
        let affected = self.execute(&q).await.map_err(|e| AppError::from_write(e, def.label))?;
        if affected == 0 {
            return Err(AppError::NotFound(def.not_found_message()));
        }
        Ok(())
    }

    pub async fn delete<E: Entity>(&self, record: &E) -> Result<(), AppError> {
        let def = E::def();
        let q = sql::delete(def, record.id());
        let affected = self.execute(&q).await.map_err(|e| AppError::from_write(e, def.label))?;
        if affected == 0 {
            return Err(AppError::NotFound(def.not_found_message()));
        }
        Ok(())
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<AnyRow>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.loggable_params(), "query");
        Ok(build(q).fetch_optional(&self.pool).await?)
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<AnyRow>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.loggable_params(), "query");
        Ok(build(q).fetch_all(&self.pool).await?)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.loggable_params(), "execute");
        let result = build(q).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

fn build(q: &QueryBuf) -> Query<'_, Any, AnyArguments<'_>> {
    let mut query = sqlx::query(&q.sql);
    for p in &q.params {
        query = p.clone().bind(query);
    }
    query
}

pub(crate) fn to_map<T: serde::Serialize>(value: &T) -> Result<Map<String, Value>, AppError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::Internal("record did not serialize to an object".into())),
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}

fn decode<E: Entity>(def: &EntityDef, row: &AnyRow) -> Result<E, AppError> {
    let map = row_to_json(def, row)?;
    serde_json::from_value(Value::Object(map)).map_err(|e| AppError::Db(sqlx::Error::Decode(Box::new(e))))
}

fn row_to_json(def: &EntityDef, row: &AnyRow) -> Result<Map<String, Value>, AppError> {
    use sqlx::Row;
    let mut map = Map::new();
    for col in def.all_columns() {
        let v = match col.ty {
            ColumnType::Text => row.try_get::<Option<String>, _>(col.name)?.map(Value::String),
            ColumnType::Integer => row.try_get::<Option<i64>, _>(col.name)?.map(|n| Value::Number(n.into())),
            ColumnType::Real => row
                .try_get::<Option<f64>, _>(col.name)?
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
        };
        map.insert(col.name.to_string(), v.unwrap_or(Value::Null));
    }
    Ok(map)
}
