use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{AccountId, TransactionId};

/// Lifecycle state of a stored transaction.
///
/// Intake always writes `Pending`; the batch operation moves rows to
/// `Completed`. `Failed` is admitted by the schema and counted by the
/// analytics, but nothing in this service writes it; it belongs to
/// external writers sharing the same table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed"
        }
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(TransactionStatus::Pending),
            "completed" => Ok(TransactionStatus::Completed),
            "failed" => Ok(TransactionStatus::Failed),
            other => Err(format!("unexpected status value [{other}]"))
        }
    }
}

/// A transaction as it exists in storage.
///
/// `amount` and `kind` are optional because intake accepts partial records;
/// `kind` is free-form text (`"deposit"`, `"withdrawal"`, or anything the
/// caller sent) and is only interpreted by the analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: Option<AccountId>,
    pub amount: Option<f64>,
    /// The declared kind of operation.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: TransactionStatus
}

/// A transaction record as submitted by a caller.
///
/// `status` is accepted for wire compatibility but never honored: every
/// enqueued row starts out `pending`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRequest {
    pub id: TransactionId,
    pub account_id: Option<AccountId>,
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<String>
}

/// The fields of a request that actually reach storage.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub id: TransactionId,
    pub account_id: Option<AccountId>,
    pub amount: Option<f64>,
    pub kind: Option<String>
}

impl From<TransactionRequest> for NewTransaction {
    fn from(request: TransactionRequest) -> Self {
        Self {
            id: request.id,
            account_id: request.account_id,
            amount: request.amount,
            kind: request.kind
        }
    }
}
