//! Entity CRUD handlers: create, read, update, delete, list. Generic over the entity.

use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::model::Entity;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// Path ids must be UUIDs. Returns the canonical lower-case hyphenated form.
pub(crate) fn parse_id<E: Entity>(id_str: &str) -> Result<String, AppError> {
    uuid::Uuid::parse_str(id_str)
        .map(|u| u.to_string())
        .map_err(|_| AppError::BadRequest(E::def().invalid_id_message()))
}

pub(crate) fn responses<E: Entity>(records: &[E]) -> Result<Vec<Value>, AppError> {
    records.iter().map(Entity::to_response).collect()
}

pub async fn list<E: Entity>(State(state): State<AppState>) -> Result<Json<Vec<Value>>, AppError> {
    let rows = CrudService::list::<E>(&state.manager).await?;
    Ok(Json(responses(&rows)?))
}

pub async fn create<E: Entity>(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let record = CrudService::create::<E>(&state.manager, body).await?;
    Ok((StatusCode::CREATED, Json(record.to_response()?)))
}

pub async fn read<E: Entity>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id::<E>(&id_str)?;
    let record = CrudService::read::<E>(&state.manager, &id).await?;
    Ok(Json(record.to_response()?))
}

/// The id is checked before the body so a bad id always yields the id error.
pub async fn update<E: Entity>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<JsonObject, AppError>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id::<E>(&id_str)?;
    let JsonObject(body) = body?;
    let record = CrudService::update::<E>(&state.manager, &id, body).await?;
    Ok(Json(record.to_response()?))
}

pub async fn delete<E: Entity>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id::<E>(&id_str)?;
    CrudService::delete::<E>(&state.manager, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
