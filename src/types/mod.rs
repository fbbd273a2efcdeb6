pub type TransactionId = String;
pub type AccountId = String;
