use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::api::validation::validate_entity_id;
use crate::models::{MovieUpdate, NewMovie};
use crate::schema::catalog;

#[derive(Debug, Deserialize)]
pub struct MovieListQuery {
    pub director_id: Option<i32>,
    pub genre_id: Option<i32>,
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let id = validate_entity_id(id)?;
    let movie = state
        .store()
        .get_movie(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(Value::Object(catalog::movie().dump(&movie))))
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MovieListQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let movies = state
        .store()
        .list_movies(query.director_id, query.genre_id)
        .await?;

    Ok(Json(catalog::movie().dump_many(&movies)))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let fields = catalog::movie().load(&payload)?;
    let new: NewMovie = serde_json::from_value(Value::Object(fields))
        .map_err(|e| ApiError::validation(e.to_string()))?;

    ensure_references(&state, new.director_id, new.genre_id).await?;

    state.store().create_movie(new).await?;
    Ok(StatusCode::CREATED)
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let id = validate_entity_id(id)?;
    let fields = catalog::movie().load_partial(&payload)?;
    let update = MovieUpdate::from_fields(&fields);

    ensure_references(&state, update.director_id.flatten(), update.genre_id.flatten()).await?;

    match state.store().update_movie(id, update).await? {
        1 => Ok(StatusCode::NO_CONTENT),
        0 => Err(ApiError::NotFound),
        n => Err(ApiError::internal(format!("update touched {n} rows"))),
    }
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_entity_id(id)?;

    match state.store().delete_movie(id).await? {
        1 => Ok(StatusCode::NO_CONTENT),
        0 => Err(ApiError::NotFound),
        n => Err(ApiError::internal(format!("delete touched {n} rows"))),
    }
}

/// A movie may only point at directors and genres that exist; a dangling id
/// is a payload error, not a server fault.
async fn ensure_references(
    state: &AppState,
    director_id: Option<i32>,
    genre_id: Option<i32>,
) -> Result<(), ApiError> {
    if let Some(id) = director_id {
        if state.store().get_director(id).await?.is_none() {
            return Err(ApiError::validation(format!("director {id} does not exist")));
        }
    }
    if let Some(id) = genre_id {
        if state.store().get_genre(id).await?.is_none() {
            return Err(ApiError::validation(format!("genre {id} does not exist")));
        }
    }
    Ok(())
}
