use sqlx::postgres::PgPool;

use crate::models::{NewTransaction, StoreError, Transaction};
use crate::storage::TransactionStore;
use crate::types::TransactionId;

/// PostgreSQL-backed transaction store over a connection pool.
///
/// Each statement runs in its own implicit transaction; there are no
/// cross-statement transactions and no row locks beyond what the engine
/// takes for the single conditional update in [`complete_pending`].
///
/// [`complete_pending`]: TransactionStore::complete_pending
pub struct PgTransactionStore {
    pool: PgPool
}

const CREATE_TRANSACTIONS_TABLE: &str = "\
    CREATE TABLE IF NOT EXISTS transactions (\
        id TEXT PRIMARY KEY,\
        account_id TEXT,\
        amount DOUBLE PRECISION,\
        type TEXT,\
        status TEXT NOT NULL DEFAULT 'pending' \
            CHECK (status IN ('pending', 'completed', 'failed'))\
    )";

impl PgTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the transactions table if it does not exist yet.
    ///
    /// The primary key on `id` is what rejects duplicate submissions; the
    /// CHECK constraint admits `failed` because external writers sharing
    /// the table set it directly.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TRANSACTIONS_TABLE).execute(&self.pool).await?;

        Ok(())
    }
}

/// Raw row shape, decoded in schema column order.
#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: String,
    account_id: Option<String>,
    amount: Option<f64>,
    #[sqlx(rename = "type")]
    kind: Option<String>,
    status: String
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = StoreError;

    fn try_from(row: TransactionRow) -> Result<Self, StoreError> {
        let status = row.status.parse().map_err(StoreError::Database)?;

        Ok(Transaction {
            id: row.id,
            account_id: row.account_id,
            amount: row.amount,
            kind: row.kind,
            status
        })
    }
}

impl TransactionStore for PgTransactionStore {
    async fn enqueue(&self, transaction: NewTransaction) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO transactions (id, account_id, amount, type, status) \
             VALUES ($1, $2, $3, $4, 'pending')"
        )
        .bind(&transaction.id)
        .bind(&transaction.account_id)
        .bind(transaction.amount)
        .bind(&transaction.kind)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn complete_pending(&self) -> Result<Vec<TransactionId>, StoreError> {
        let rows: Vec<(TransactionId,)> = sqlx::query_as(
            "UPDATE transactions SET status = 'completed' \
             WHERE status = 'pending' RETURNING id"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn fetch_all(&self, account_id: Option<&str>) -> Result<Vec<Transaction>, StoreError> {
        let rows: Vec<TransactionRow> = match account_id {
            Some(account_id) => {
                sqlx::query_as(
                    "SELECT id, account_id, amount, type, status \
                     FROM transactions WHERE account_id = $1"
                )
                .bind(account_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as("SELECT id, account_id, amount, type, status FROM transactions")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        rows.into_iter().map(Transaction::try_from).collect()
    }
}
