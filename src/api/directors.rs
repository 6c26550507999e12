use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::api::validation::validate_entity_id;
use crate::db::DeleteOutcome;
use crate::models::{DirectorUpdate, NewDirector};
use crate::schema::catalog;

pub async fn get_director(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let id = validate_entity_id(id)?;
    let director = state
        .store()
        .get_director(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(Value::Object(catalog::director().dump(&director))))
}

pub async fn list_directors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let directors = state.store().list_directors().await?;
    Ok(Json(catalog::director().dump_many(&directors)))
}

pub async fn create_director(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let fields = catalog::director().load(&payload)?;
    let new: NewDirector = serde_json::from_value(Value::Object(fields))
        .map_err(|e| ApiError::validation(e.to_string()))?;

    state.store().create_director(new).await?;
    Ok(StatusCode::CREATED)
}

pub async fn update_director(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let id = validate_entity_id(id)?;
    let fields = catalog::director().load_partial(&payload)?;
    let update = DirectorUpdate::from_fields(&fields);

    match state.store().update_director(id, update).await? {
        1 => Ok(StatusCode::NO_CONTENT),
        0 => Err(ApiError::NotFound),
        n => Err(ApiError::internal(format!("update touched {n} rows"))),
    }
}

pub async fn delete_director(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_entity_id(id)?;

    match state.store().delete_director(id).await? {
        DeleteOutcome::Deleted => Ok(StatusCode::NO_CONTENT),
        DeleteOutcome::Missing => Err(ApiError::NotFound),
        DeleteOutcome::Referenced { movies } => Err(ApiError::conflict(format!(
            "director {id} is still referenced by {movies} movie(s)"
        ))),
    }
}
