//! Convert serde_json::Value to types sqlx can bind through the Any driver.

use crate::error::AppError;
use crate::model::{ColumnDef, ColumnType};
use serde_json::Value;
use sqlx::any::{Any, AnyArguments};
use sqlx::query::Query;

/// A value that can be bound to a query on any configured backend. Nulls carry
/// the column type so PostgreSQL sees a correctly typed parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Null(ColumnType),
    Text(String),
    Integer(i64),
    Real(f64),
}

impl SqlValue {
    pub fn from_json(v: &Value, col: &ColumnDef) -> Result<Self, AppError> {
        let mismatch = || AppError::Validation(format!("{} must be {}", col.name, expected(col.ty)));
        Ok(match (col.ty, v) {
            (ty, Value::Null) => SqlValue::Null(ty),
            (ColumnType::Text, Value::String(s)) => SqlValue::Text(s.clone()),
            (ColumnType::Integer, Value::Number(n)) => SqlValue::Integer(n.as_i64().ok_or_else(mismatch)?),
            (ColumnType::Real, Value::Number(n)) => SqlValue::Real(n.as_f64().ok_or_else(mismatch)?),
            _ => return Err(mismatch()),
        })
    }

    pub fn bind<'q>(self, query: Query<'q, Any, AnyArguments<'q>>) -> Query<'q, Any, AnyArguments<'q>> {
        match self {
            SqlValue::Null(ColumnType::Text) => query.bind(None::<String>),
            SqlValue::Null(ColumnType::Integer) => query.bind(None::<i64>),
            SqlValue::Null(ColumnType::Real) => query.bind(None::<f64>),
            SqlValue::Text(s) => query.bind(s),
            SqlValue::Integer(n) => query.bind(n),
            SqlValue::Real(n) => query.bind(n),
        }
    }
}

pub(crate) fn expected(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Text => "a string",
        ColumnType::Integer => "an integer",
        ColumnType::Real => "a number",
    }
}
