//! Builds parameterized INSERT, SELECT, UPDATE, DELETE and CREATE TABLE from entity definitions.

use crate::error::AppError;
use crate::model::{ColumnDef, EntityDef};
use crate::sql::SqlValue;
use serde_json::{Map, Value};

/// Quote identifier (safe: only from static definitions).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
    /// Indexes into `params` that must not be logged.
    redacted: Vec<usize>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
            redacted: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlValue, sensitive: bool) -> usize {
        if sensitive {
            self.redacted.push(self.params.len());
        }
        self.params.push(v);
        self.params.len()
    }

    /// Parameters as printed in debug logs, sensitive ones masked.
    pub fn loggable_params(&self) -> Vec<String> {
        self.params
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if self.redacted.contains(&i) {
                    "<redacted>".to_string()
                } else {
                    format!("{:?}", p)
                }
            })
            .collect()
    }
}

fn select_column_list(def: &EntityDef) -> String {
    def.all_columns().map(|c| quoted(c.name)).collect::<Vec<_>>().join(", ")
}

/// SELECT every row, oldest first.
pub fn select_all(def: &EntityDef) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY \"create_time\", \"id\"",
        select_column_list(def),
        quoted(def.table)
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(def: &EntityDef, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlValue::Text(id.to_string()), false);
    q.sql = format!(
        "SELECT {} FROM {} WHERE \"id\" = ${}",
        select_column_list(def),
        quoted(def.table),
        n
    );
    q
}

/// SELECT rows whose `column` equals `value`, oldest first.
pub fn select_where(def: &EntityDef, column: &ColumnDef, value: SqlValue) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(value, column.sensitive);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${} ORDER BY \"create_time\", \"id\"",
        select_column_list(def),
        quoted(def.table),
        quoted(column.name),
        n
    );
    q
}

/// Existence probe by primary key on an arbitrary defined table.
pub fn select_exists(table: &str, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlValue::Text(id.to_string()), false);
    q.sql = format!("SELECT 1 FROM {} WHERE \"id\" = ${}", quoted(table), n);
    q
}

/// INSERT every column of `row`. Missing keys are bound as NULL.
pub fn insert(def: &EntityDef, row: &Map<String, Value>) -> Result<QueryBuf, AppError> {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for col in def.all_columns() {
        let value = SqlValue::from_json(row.get(col.name).unwrap_or(&Value::Null), col)?;
        let n = q.push_param(value, col.sensitive);
        cols.push(quoted(col.name));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(def.table),
        cols.join(", "),
        placeholders.join(", ")
    );
    Ok(q)
}

/// UPDATE every mutable column of `row` by id. `id` and `create_time` are never written.
pub fn update(def: &EntityDef, id: &str, row: &Map<String, Value>) -> Result<QueryBuf, AppError> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for col in def.all_columns().filter(|c| c.name != "id" && c.name != "create_time") {
        let value = SqlValue::from_json(row.get(col.name).unwrap_or(&Value::Null), col)?;
        let n = q.push_param(value, col.sensitive);
        sets.push(format!("{} = ${}", quoted(col.name), n));
    }
    let n = q.push_param(SqlValue::Text(id.to_string()), false);
    q.sql = format!(
        "UPDATE {} SET {} WHERE \"id\" = ${}",
        quoted(def.table),
        sets.join(", "),
        n
    );
    Ok(q)
}

/// DELETE by primary key.
pub fn delete(def: &EntityDef, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlValue::Text(id.to_string()), false);
    q.sql = format!("DELETE FROM {} WHERE \"id\" = ${}", quoted(def.table), n);
    q
}

/// CREATE TABLE IF NOT EXISTS with NOT NULL, UNIQUE and REFERENCES from the definition.
/// Only uses types and syntax shared by PostgreSQL and SQLite.
pub fn create_table(def: &EntityDef) -> String {
    let col_defs: Vec<String> = def
        .all_columns()
        .map(|c| {
            let mut s = format!("{} {}", quoted(c.name), c.ty.sql_type());
            if !c.nullable {
                s.push_str(" NOT NULL");
            }
            if c.name == "id" {
                s.push_str(" PRIMARY KEY");
            } else if c.unique {
                s.push_str(" UNIQUE");
            }
            if let Some(target) = c.references {
                s.push_str(&format!(" REFERENCES {} (\"id\")", quoted(target)));
            }
            s
        })
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(def.table),
        col_defs.join(", ")
    )
}
