use axum::{Json, extract::State};
use std::sync::Arc;

use super::AppState;
use crate::schema::ModelRegistry;

/// The wire-model registry, for API documentation generation.
pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelRegistry> {
    Json(state.models().clone())
}
