mod memory;
mod postgres;

use std::future::Future;

use crate::models::{NewTransaction, StoreError, Transaction};
use crate::types::TransactionId;

pub use memory::MemoryStore;
pub use postgres::PgTransactionStore;

/// Persistence seam for the intake service.
///
/// Handlers are generic over this trait so the PostgreSQL store can be
/// swapped for the in-memory one in tests without touching the transport.
pub trait TransactionStore: Send + Sync + 'static {
    /// Persists a new transaction in the `pending` state.
    fn enqueue(&self, transaction: NewTransaction) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Flips every row that is `pending` at call time to `completed` in one
    /// conditional update, returning the ids that were transitioned.
    fn complete_pending(&self) -> impl Future<Output = Result<Vec<TransactionId>, StoreError>> + Send;

    /// Fetches all stored transactions, optionally restricted to a single
    /// account. Rows with a different or absent account id are excluded by
    /// the filter.
    fn fetch_all(&self, account_id: Option<&str>) -> impl Future<Output = Result<Vec<Transaction>, StoreError>> + Send;
}
