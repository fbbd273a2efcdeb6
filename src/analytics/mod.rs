
use serde::Serialize;

use crate::models::{Transaction, TransactionStatus};

/// Aggregate view over a set of transactions.
///
/// On an empty input only `total_transactions` and `message` are populated;
/// every `None` field is omitted from the serialized body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub total_transactions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_deposits: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_withdrawals: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_flow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>
}

/// Summarizes a fetched set of transactions.
///
/// Status counts cover every row in the input regardless of kind; the
/// deposit and withdrawal sums only consider rows that are both of the
/// matching kind and `completed`. A missing amount counts as zero.
pub fn summarize(transactions: &[Transaction]) -> AnalyticsReport {
    if transactions.is_empty() {
        return AnalyticsReport {
            total_transactions: 0,
            completed: None,
            pending: None,
            failed: None,
            total_deposits: None,
            total_withdrawals: None,
            net_flow: None,
            message: Some("No transactions found".to_string())
        };
    }

    let mut completed = 0;
    let mut pending = 0;
    let mut failed = 0;
    let mut total_deposits = 0.0;
    let mut total_withdrawals = 0.0;

    for transaction in transactions {
        match transaction.status {
            TransactionStatus::Completed => completed += 1,
            TransactionStatus::Pending => pending += 1,
            TransactionStatus::Failed => failed += 1
        }

        if transaction.status != TransactionStatus::Completed {
            continue;
        }

        let amount = transaction.amount.unwrap_or(0.0);

        match transaction.kind.as_deref() {
            Some("deposit") => total_deposits += amount,
            Some("withdrawal") => total_withdrawals += amount,
            _ => {}
        }
    }

    AnalyticsReport {
        total_transactions: transactions.len(),
        completed: Some(completed),
        pending: Some(pending),
        failed: Some(failed),
        total_deposits: Some(total_deposits),
        total_withdrawals: Some(total_withdrawals),
        net_flow: Some(total_deposits - total_withdrawals),
        message: None
    }
}
