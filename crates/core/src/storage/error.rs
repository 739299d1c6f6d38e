use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Scan failed: {0}")]
    ScanFailed(String),
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
    #[error("Transaction cancelled: {0}")]
    TransactionCancelled(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
