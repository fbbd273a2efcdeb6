use thiserror::Error;

/// Failures surfaced by the persistence layer.
///
/// Every storage problem (connectivity, constraint violation, malformed
/// statement) collapses into `Database` carrying the driver's message.
/// Callers do not branch on the cause; they report it and move on.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String)
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        StoreError::Database(error.to_string())
    }
}
