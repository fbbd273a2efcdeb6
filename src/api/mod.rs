mod handlers;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::storage::TransactionStore;

pub use handlers::ApiError;

/// Shared handler state: the injected transaction store.
pub struct AppState<S> {
    pub store: Arc<S>
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self { store: self.store.clone() }
    }
}

/// Builds the service router over any store implementation.
pub fn router<S: TransactionStore>(store: Arc<S>) -> Router {
    Router::new()
        .route("/process", post(handlers::process_transaction::<S>))
        .route("/process/batch", post(handlers::process_batch::<S>))
        .route("/analytics", get(handlers::get_analytics::<S>))
        .route("/health", get(handlers::health_check))
        .with_state(AppState { store })
}
