//! Request validation from entity definitions. One rule set serves POST and PUT.

use crate::error::AppError;
use crate::model::{ColumnDef, ColumnType, EntityDef, Format, READ_ONLY_FIELDS};
use crate::sql::params::expected;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

fn email_regex() -> Result<&'static Regex, AppError> {
    static EMAIL: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN))
        .as_ref()
        .map_err(|e| AppError::Validation(format!("invalid email pattern: {}", e)))
}

pub struct RequestValidator;

impl RequestValidator {
    /// Keep only writable columns of `def`; drop read-only and unknown keys.
    pub fn writable_fields(body: Map<String, Value>, def: &EntityDef) -> Map<String, Value> {
        body.into_iter()
            .filter(|(k, _)| !READ_ONLY_FIELDS.contains(&k.as_str()))
            .filter(|(k, _)| def.columns.iter().any(|c| c.name == k.as_str()))
            .collect()
    }

    /// Validate a create body. All required fields must be present and non-null.
    pub fn validate(body: &Map<String, Value>, def: &EntityDef) -> Result<(), AppError> {
        for col in def.columns {
            let val = body.get(col.name);
            if col.rule.required && matches!(val, None | Some(Value::Null)) {
                return Err(AppError::Validation(format!("{} is required", col.name)));
            }
            if let Some(v) = val {
                validate_field(col, v)?;
            }
        }
        Ok(())
    }

    /// Validate only the fields present in body (for PUT). Required is not enforced
    /// for missing fields, but a present field may not be null unless nullable.
    pub fn validate_partial(body: &Map<String, Value>, def: &EntityDef) -> Result<(), AppError> {
        for (name, v) in body {
            if let Some(col) = def.columns.iter().find(|c| c.name == name.as_str()) {
                validate_field(col, v)?;
            }
        }
        Ok(())
    }

    /// Rewrite reference columns to the canonical lower-case hyphenated form, the
    /// same form path ids take. Call after validation.
    pub fn normalize_references(body: &mut Map<String, Value>, def: &EntityDef) -> Result<(), AppError> {
        for col in def.columns.iter().filter(|c| c.references.is_some()) {
            if let Some(Value::String(s)) = body.get_mut(col.name) {
                let id = uuid::Uuid::parse_str(s)
                    .map_err(|_| AppError::Validation(format!("{} must be a valid UUID", col.name)))?;
                *s = id.to_string();
            }
        }
        Ok(())
    }
}

fn validate_field(col: &ColumnDef, v: &Value) -> Result<(), AppError> {
    if v.is_null() {
        if col.nullable {
            return Ok(());
        }
        return Err(AppError::Validation(format!("{} must not be null", col.name)));
    }
    let type_ok = match col.ty {
        ColumnType::Text => v.is_string(),
        ColumnType::Integer => v.is_i64(),
        ColumnType::Real => v.is_number(),
    };
    if !type_ok {
        return Err(AppError::Validation(format!("{} must be {}", col.name, expected(col.ty))));
    }
    let rule = &col.rule;
    if let Some(s) = v.as_str() {
        let len = s.chars().count();
        if let Some(min) = rule.min_length {
            if len < min {
                return Err(AppError::Validation(format!(
                    "{} must be at least {} characters",
                    col.name, min
                )));
            }
        }
        if let Some(max) = rule.max_length {
            if len > max {
                return Err(AppError::Validation(format!(
                    "{} must be at most {} characters",
                    col.name, max
                )));
            }
        }
        if let Some(format) = rule.format {
            validate_format(col.name, s, format)?;
        }
        if let Some(pattern) = rule.pattern {
            let re = Regex::new(pattern).map_err(|_| AppError::Validation(format!("invalid pattern for {}", col.name)))?;
            if !re.is_match(s) {
                return Err(AppError::Validation(format!("{} does not match required pattern", col.name)));
            }
        }
    }
    if let Some(n) = v.as_f64() {
        if let Some(min) = rule.minimum {
            if n < min {
                return Err(AppError::Validation(format!("{} must be at least {}", col.name, min)));
            }
        }
        if let Some(max) = rule.maximum {
            if n > max {
                return Err(AppError::Validation(format!("{} must be at most {}", col.name, max)));
            }
        }
    }
    Ok(())
}

fn validate_format(name: &str, s: &str, format: Format) -> Result<(), AppError> {
    match format {
        Format::Email => {
            if !email_regex()?.is_match(s) {
                return Err(AppError::Validation(format!("{} must be a valid email address", name)));
            }
        }
        Format::Uuid => {
            if uuid::Uuid::parse_str(s).is_err() {
                return Err(AppError::Validation(format!("{} must be a valid UUID", name)));
            }
        }
    }
    Ok(())
}
