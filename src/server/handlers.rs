//! Handlers for `/api/v1/counters`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::{Counter, CounterUpdate};

use super::error::ApiError;
use super::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive title filter.
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCounterRequest {
    pub title: String,
}

pub async fn list_counters(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Counter>>, ApiError> {
    let counters = state.repository.list(query.q.as_deref()).await?;
    Ok(Json(counters))
}

pub async fn create_counter(
    State(state): State<AppState>,
    payload: Result<Json<CreateCounterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Counter>), ApiError> {
    let Json(request) = payload?;
    let counter = state.repository.create(&request.title).await?;
    tracing::info!(id = %counter.id, "Counter created via API");
    Ok((StatusCode::CREATED, Json(counter)))
}

pub async fn get_counter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Counter>, ApiError> {
    Ok(Json(state.repository.get(&id).await?))
}

pub async fn update_counter(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CounterUpdate>, JsonRejection>,
) -> Result<Json<Counter>, ApiError> {
    let Json(update) = payload?;
    if update.title.is_none() && update.count.is_none() {
        return Err(ApiError::InvalidRequest(
            "expected at least one of 'title' or 'count'".to_string(),
        ));
    }
    Ok(Json(state.repository.update(&id, update).await?))
}

pub async fn delete_counter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = state.repository.delete(std::slice::from_ref(&id)).await?;
    if removed == 0 {
        return Err(ApiError::NotFound { id });
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn increment_counter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Counter>, ApiError> {
    Ok(Json(state.repository.increase(&id).await?))
}

pub async fn decrement_counter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Counter>, ApiError> {
    Ok(Json(state.repository.decrease(&id).await?))
}
