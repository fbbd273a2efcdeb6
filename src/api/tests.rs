use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api;
use crate::models::{NewTransaction, StoreError, Transaction};
use crate::storage::{MemoryStore, TransactionStore};
use crate::types::TransactionId;

/// Store whose every operation fails, for exercising the 500 mapping.
struct FailingStore;

impl TransactionStore for FailingStore {
    async fn enqueue(&self, _transaction: NewTransaction) -> Result<(), StoreError> {
        Err(StoreError::Database("connection refused".to_string()))
    }

    async fn complete_pending(&self) -> Result<Vec<TransactionId>, StoreError> {
        Err(StoreError::Database("connection refused".to_string()))
    }

    async fn fetch_all(&self, _account_id: Option<&str>) -> Result<Vec<Transaction>, StoreError> {
        Err(StoreError::Database("connection refused".to_string()))
    }
}

fn test_router() -> Router {
    api::router(Arc::new(MemoryStore::new()))
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?,
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())?
    };

    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, value))
}

#[tokio::test]
async fn test_process_queues_transaction_and_acknowledges() -> Result<()> {
    let router = test_router();

    let (status, body) = send(&router, "POST", "/process", Some(json!({
        "id": "t1",
        "account_id": "A",
        "amount": 100.0,
        "type": "deposit"
    }))).await?;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, json!({"status": "queued", "transaction_id": "t1"}));

    let (status, body) = send(&router, "GET", "/analytics", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_transactions"], json!(1));
    assert_eq!(body["pending"], json!(1));
    assert_eq!(body["completed"], json!(0));

    Ok(())
}

#[tokio::test]
async fn test_process_ignores_caller_supplied_status() -> Result<()> {
    let router = test_router();

    let (status, _) = send(&router, "POST", "/process", Some(json!({
        "id": "t1",
        "amount": 100.0,
        "type": "deposit",
        "status": "completed"
    }))).await?;

    assert_eq!(status, StatusCode::ACCEPTED);

    let (_, body) = send(&router, "GET", "/analytics", None).await?;

    assert_eq!(body["pending"], json!(1));
    assert_eq!(body["completed"], json!(0));

    Ok(())
}

#[tokio::test]
async fn test_batch_reports_one_outcome_per_completed_transaction() -> Result<()> {
    let router = test_router();

    send(&router, "POST", "/process", Some(json!({"id": "t1", "amount": 10.0, "type": "deposit"}))).await?;
    send(&router, "POST", "/process", Some(json!({"id": "t2", "amount": 20.0, "type": "deposit"}))).await?;

    let (status, body) = send(&router, "POST", "/process/batch", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"results": [
        {"transaction_id": "t1", "status": "success", "message": "Transaction processed"},
        {"transaction_id": "t2", "status": "success", "message": "Transaction processed"}
    ]}));

    Ok(())
}

#[tokio::test]
async fn test_second_batch_without_new_intake_is_empty() -> Result<()> {
    let router = test_router();

    send(&router, "POST", "/process", Some(json!({"id": "t1", "amount": 10.0, "type": "deposit"}))).await?;
    send(&router, "POST", "/process/batch", None).await?;

    let (status, body) = send(&router, "POST", "/process/batch", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"results": []}));

    Ok(())
}

#[tokio::test]
async fn test_analytics_on_empty_store_returns_message_only() -> Result<()> {
    let router = test_router();

    let (status, body) = send(&router, "GET", "/analytics", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"total_transactions": 0, "message": "No transactions found"}));

    Ok(())
}

#[tokio::test]
async fn test_analytics_filter_excludes_other_and_absent_accounts() -> Result<()> {
    let router = test_router();

    send(&router, "POST", "/process", Some(json!({"id": "t1", "account_id": "A", "amount": 10.0, "type": "deposit"}))).await?;
    send(&router, "POST", "/process", Some(json!({"id": "t2", "account_id": "B", "amount": 20.0, "type": "deposit"}))).await?;
    send(&router, "POST", "/process", Some(json!({"id": "t3", "amount": 30.0, "type": "deposit"}))).await?;

    let (_, body) = send(&router, "GET", "/analytics?account_id=A", None).await?;

    assert_eq!(body["total_transactions"], json!(1));
    assert_eq!(body["pending"], json!(1));

    Ok(())
}

#[tokio::test]
async fn test_duplicate_id_surfaces_as_internal_error() -> Result<()> {
    let router = test_router();

    send(&router, "POST", "/process", Some(json!({"id": "t1", "amount": 10.0, "type": "deposit"}))).await?;

    let (status, body) = send(&router, "POST", "/process", Some(json!({"id": "t1", "amount": 10.0, "type": "deposit"}))).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("Database error"));

    Ok(())
}

#[tokio::test]
async fn test_health_reports_healthy() -> Result<()> {
    let router = test_router();

    let (status, body) = send(&router, "GET", "/health", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));

    Ok(())
}

#[tokio::test]
async fn test_health_succeeds_while_storage_is_unreachable() -> Result<()> {
    let router = api::router(Arc::new(FailingStore));

    let (status, body) = send(&router, "GET", "/health", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));

    Ok(())
}

#[tokio::test]
async fn test_storage_failures_map_to_500_with_detail() -> Result<()> {
    let router = api::router(Arc::new(FailingStore));

    for (method, uri, body) in [
        ("POST", "/process", Some(json!({"id": "t1"}))),
        ("POST", "/process/batch", None),
        ("GET", "/analytics", None)
    ] {
        let (status, response) = send(&router, method, uri, body).await?;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response, json!({"detail": "Database error: connection refused"}));
    }

    Ok(())
}
