//! Transaction intake and reporting service for a banking backend.
//!
//! Accepts transaction records over HTTP, stores them as `pending`, marks
//! the queued set `completed` in bulk, and reports aggregate analytics per
//! account. Processing a transaction means flipping its status column;
//! there is no ledger posting behind it.

pub mod analytics;
pub mod api;
pub mod config;
pub mod models;
pub mod storage;
pub mod types;

pub use config::Config;
pub use models::{StoreError, Transaction, TransactionStatus};
pub use storage::TransactionStore;
