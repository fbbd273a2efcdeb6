use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::analytics::{self, AnalyticsReport};
use crate::api::AppState;
use crate::models::{NewTransaction, StoreError, TransactionRequest};
use crate::storage::TransactionStore;
use crate::types::{AccountId, TransactionId};

/// Maps storage failures onto HTTP 500 responses carrying the underlying
/// error text in a `detail` envelope.
#[derive(Debug)]
pub struct ApiError(StoreError);

#[derive(Serialize)]
struct ErrorBody {
    detail: String
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{}", self.0);

        let body = ErrorBody {
            detail: self.0.to_string()
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        Self(error)
    }
}

#[derive(Serialize)]
pub struct QueuedResponse {
    pub status: &'static str,
    pub transaction_id: TransactionId
}

#[derive(Serialize)]
pub struct BatchOutcome {
    pub transaction_id: TransactionId,
    pub status: &'static str,
    pub message: &'static str
}

#[derive(Serialize)]
pub struct BatchResponse {
    pub results: Vec<BatchOutcome>
}

#[derive(Deserialize)]
pub struct AnalyticsParams {
    pub account_id: Option<AccountId>
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str
}

/// POST /process: queue a transaction for later completion.
///
/// Whatever status the caller supplied is discarded; the stored row always
/// starts out `pending`.
pub async fn process_transaction<S: TransactionStore>(
    State(state): State<AppState<S>>,
    Json(request): Json<TransactionRequest>
) -> Result<(StatusCode, Json<QueuedResponse>), ApiError> {
    let record = NewTransaction::from(request);
    let transaction_id = record.id.clone();

    state.store.enqueue(record).await?;

    debug!("Transaction [{transaction_id}] queued");

    Ok((StatusCode::ACCEPTED, Json(QueuedResponse {
        status: "queued",
        transaction_id
    })))
}

/// POST /process/batch: complete everything that is pending right now.
pub async fn process_batch<S: TransactionStore>(
    State(state): State<AppState<S>>
) -> Result<Json<BatchResponse>, ApiError> {
    let completed = state.store.complete_pending().await?;

    info!("Batch completed [{}] pending transactions", completed.len());

    let results = completed.into_iter()
        .map(|transaction_id| BatchOutcome {
            transaction_id,
            status: "success",
            message: "Transaction processed"
        })
        .collect();

    Ok(Json(BatchResponse { results }))
}

/// GET /analytics: aggregate view, optionally restricted to one account.
pub async fn get_analytics<S: TransactionStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<AnalyticsParams>
) -> Result<Json<AnalyticsReport>, ApiError> {
    let transactions = state.store.fetch_all(params.account_id.as_deref()).await?;

    Ok(Json(analytics::summarize(&transactions)))
}

/// GET /health: liveness probe; never touches storage.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
