//! Child collections under a parent record.

use crate::error::AppError;
use crate::handlers::entity::{parse_id, responses};
use crate::model::{City, Country, Place, Review};
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

/// GET /countries/:id/cities
pub async fn country_cities(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    let id = parse_id::<Country>(&id_str)?;
    let cities = CrudService::children::<Country, City>(&state.manager, &id, "country_id").await?;
    Ok(Json(responses(&cities)?))
}

/// GET /places/:id/reviews
pub async fn place_reviews(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    let id = parse_id::<Place>(&id_str)?;
    let reviews = CrudService::children::<Place, Review>(&state.manager, &id, "place_id").await?;
    Ok(Json(responses(&reviews)?))
}
