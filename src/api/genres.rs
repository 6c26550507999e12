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
use crate::models::{GenreUpdate, NewGenre};
use crate::schema::catalog;

pub async fn get_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let id = validate_entity_id(id)?;
    let genre = state
        .store()
        .get_genre(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(Value::Object(catalog::genre().dump(&genre))))
}

pub async fn list_genres(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Value>>, ApiError> {
    let genres = state.store().list_genres().await?;
    Ok(Json(catalog::genre().dump_many(&genres)))
}

pub async fn create_genre(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let fields = catalog::genre().load(&payload)?;
    let new: NewGenre = serde_json::from_value(Value::Object(fields))
        .map_err(|e| ApiError::validation(e.to_string()))?;

    state.store().create_genre(new).await?;
    Ok(StatusCode::CREATED)
}

pub async fn update_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let id = validate_entity_id(id)?;
    let fields = catalog::genre().load_partial(&payload)?;
    let update = GenreUpdate::from_fields(&fields);

    match state.store().update_genre(id, update).await? {
        1 => Ok(StatusCode::NO_CONTENT),
        0 => Err(ApiError::NotFound),
        n => Err(ApiError::internal(format!("update touched {n} rows"))),
    }
}

pub async fn delete_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_entity_id(id)?;

    match state.store().delete_genre(id).await? {
        DeleteOutcome::Deleted => Ok(StatusCode::NO_CONTENT),
        DeleteOutcome::Missing => Err(ApiError::NotFound),
        DeleteOutcome::Referenced { movies } => Err(ApiError::conflict(format!(
            "genre {id} is still referenced by {movies} movie(s)"
        ))),
    }
}
