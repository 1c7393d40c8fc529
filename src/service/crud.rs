//! Validate, check integrity, persist. Shared by every entity's handlers.

use crate::error::AppError;
use crate::model::{Base, Entity};
use crate::service::data_manager::to_map;
use crate::service::{DataManager, RequestValidator};
use serde_json::{Map, Value};

pub struct CrudService;

impl CrudService {
    pub async fn list<E: Entity>(dm: &DataManager) -> Result<Vec<E>, AppError> {
        dm.get_all::<E>().await
    }

    /// Fetch by id or fail with the entity's not-found message.
    pub async fn read<E: Entity>(dm: &DataManager, id: &str) -> Result<E, AppError> {
        dm.get::<E>(id)
            .await?
            .ok_or_else(|| AppError::NotFound(E::def().not_found_message()))
    }

    pub async fn create<E: Entity>(dm: &DataManager, body: Map<String, Value>) -> Result<E, AppError> {
        let def = E::def();
        let mut fields = RequestValidator::writable_fields(body, def);
        RequestValidator::validate(&fields, def)?;
        RequestValidator::normalize_references(&mut fields, def)?;
        Self::check_integrity::<E>(dm, &fields, None).await?;
        E::prepare(&mut fields)?;

        let mut row = to_map(&Base::new())?;
        row.extend(fields);
        let record: E = from_map(row)?;
        dm.save(&record).await?;
        tracing::info!(entity = def.label, id = record.id(), "created");
        Ok(record)
    }

    /// Apply the provided fields to an existing record. `id` and `create_time` never change.
    pub async fn update<E: Entity>(dm: &DataManager, id: &str, body: Map<String, Value>) -> Result<E, AppError> {
        let def = E::def();
        let existing = Self::read::<E>(dm, id).await?;
        let mut fields = RequestValidator::writable_fields(body, def);
        RequestValidator::validate_partial(&fields, def)?;
        RequestValidator::normalize_references(&mut fields, def)?;
        Self::check_integrity::<E>(dm, &fields, Some(id)).await?;
        E::prepare(&mut fields)?;

        let mut row = to_map(&existing)?;
        row.extend(fields);
        let mut record: E = from_map(row)?;
        dm.update(&mut record).await?;
        tracing::info!(entity = def.label, id = record.id(), "updated");
        Ok(record)
    }

    pub async fn delete<E: Entity>(dm: &DataManager, id: &str) -> Result<(), AppError> {
        let record = Self::read::<E>(dm, id).await?;
        dm.delete(&record).await?;
        tracing::info!(entity = E::def().label, id = record.id(), "deleted");
        Ok(())
    }

    /// Records of `C` whose `fk` points at the `P` with `parent_id`. 404 when the parent is missing.
    pub async fn children<P: Entity, C: Entity>(dm: &DataManager, parent_id: &str, fk: &str) -> Result<Vec<C>, AppError> {
        Self::read::<P>(dm, parent_id).await?;
        dm.find_by::<C>(fk, &Value::String(parent_id.to_string())).await
    }

    /// Unique columns must not collide with another record; references must resolve.
    async fn check_integrity<E: Entity>(
        dm: &DataManager,
        fields: &Map<String, Value>,
        self_id: Option<&str>,
    ) -> Result<(), AppError> {
        let def = E::def();
        for col in def.columns {
            let value = match fields.get(col.name) {
                Some(v) if !v.is_null() => v,
                _ => continue,
            };
            if col.unique {
                let taken = dm
                    .find_by::<E>(col.name, value)
                    .await?
                    .iter()
                    .any(|other| Some(other.id()) != self_id);
                if taken {
                    return Err(AppError::Conflict(format!(
                        "A {} with this {} already exists",
                        def.label, col.name
                    )));
                }
            }
            if let (Some(target), Some(id)) = (col.references, value.as_str()) {
                if !dm.exists(target, id).await? {
                    return Err(AppError::Validation(format!(
                        "{} does not match any record in {}",
                        col.name, target
                    )));
                }
            }
        }
        Ok(())
    }
}

fn from_map<E: Entity>(row: Map<String, Value>) -> Result<E, AppError> {
    serde_json::from_value(Value::Object(row)).map_err(|e| AppError::Validation(e.to_string()))
}
