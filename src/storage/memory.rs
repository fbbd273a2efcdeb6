use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::models::{NewTransaction, StoreError, Transaction, TransactionStatus};
use crate::storage::TransactionStore;
use crate::types::TransactionId;

/// In-memory transaction store with the same observable semantics as the
/// PostgreSQL implementation, including duplicate-id rejection and
/// insertion-order reads. Used by the test suites and for local runs
/// without a database.
pub struct MemoryStore {
    rows: DashMap<TransactionId, (u64, Transaction)>,
    sequence: AtomicU64
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            sequence: AtomicU64::new(0)
        }
    }

    fn snapshot(&self) -> Vec<(u64, Transaction)> {
        let mut rows: Vec<(u64, Transaction)> = self.rows.iter()
            .map(|entry| entry.value().clone())
            .collect();

        rows.sort_by_key(|(sequence, _)| *sequence);
        rows
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore for MemoryStore {
    async fn enqueue(&self, transaction: NewTransaction) -> Result<(), StoreError> {
        match self.rows.entry(transaction.id.clone()) {
            Entry::Occupied(_) => {
                // mirrors the primary-key violation the real table raises
                Err(StoreError::Database(format!(
                    "duplicate key value violates unique constraint on transaction id [{}]",
                    transaction.id
                )))
            }
            Entry::Vacant(slot) => {
                let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);

                slot.insert((sequence, Transaction {
                    id: transaction.id,
                    account_id: transaction.account_id,
                    amount: transaction.amount,
                    kind: transaction.kind,
                    status: TransactionStatus::Pending
                }));

                Ok(())
            }
        }
    }

    async fn complete_pending(&self) -> Result<Vec<TransactionId>, StoreError> {
        let pending: Vec<TransactionId> = self.snapshot().into_iter()
            .filter(|(_, transaction)| transaction.status == TransactionStatus::Pending)
            .map(|(_, transaction)| transaction.id)
            .collect();

        for id in &pending {
            if let Some(mut entry) = self.rows.get_mut(id) {
                entry.value_mut().1.status = TransactionStatus::Completed;
            }
        }

        Ok(pending)
    }

    async fn fetch_all(&self, account_id: Option<&str>) -> Result<Vec<Transaction>, StoreError> {
        let transactions = self.snapshot().into_iter()
            .map(|(_, transaction)| transaction)
            .filter(|transaction| match account_id {
                Some(filter) => transaction.account_id.as_deref() == Some(filter),
                None => true
            })
            .collect();

        Ok(transactions)
    }
}
