use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::domain::CountersRepository;

use super::handlers;
use super::health::health;

/// Shared state of every handler.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn CountersRepository>,
}

pub fn build_router(repository: Arc<dyn CountersRepository>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/v1/counters",
            get(handlers::list_counters).post(handlers::create_counter),
        )
        .route(
            "/api/v1/counters/{id}",
            get(handlers::get_counter)
                .put(handlers::update_counter)
                .delete(handlers::delete_counter),
        )
        .route(
            "/api/v1/counters/{id}/increment",
            post(handlers::increment_counter),
        )
        .route(
            "/api/v1/counters/{id}/decrement",
            post(handlers::decrement_counter),
        )
        .with_state(AppState { repository })
}
