mod errors;
mod transaction;

pub use errors::StoreError;
pub use transaction::{NewTransaction, Transaction, TransactionRequest, TransactionStatus};
