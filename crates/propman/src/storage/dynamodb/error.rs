//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `propman_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::transact_write_items::TransactWriteItemsError;
use aws_sdk_dynamodb::types::error::TransactionCanceledException;
use propman_core::storage::RepositoryError;

/// Requests that never reached the table.
fn connection_failure<E, R: Debug>(err: &SdkError<E, R>) -> Option<RepositoryError> {
    match err {
        SdkError::TimeoutError(_) => Some(RepositoryError::ConnectionFailed(
            "Request timed out".to_string(),
        )),
        SdkError::DispatchFailure(failure) => Some(RepositoryError::ConnectionFailed(format!(
            "Dispatch failure: {:?}",
            failure
        ))),
        _ => None,
    }
}

/// Map a Scan SDK error to RepositoryError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
) -> RepositoryError {
    if let Some(mapped) = connection_failure(&err) {
        return mapped;
    }
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => {
            RepositoryError::ScanFailed("Table not found".to_string())
        }
        ScanError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::ScanFailed("Throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            RepositoryError::ScanFailed("Request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            RepositoryError::ScanFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::ScanFailed(format!("Scan failed: {:?}", err)),
    }
}

/// Map a TransactWriteItems SDK error to RepositoryError.
pub fn map_transact_write_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<TransactWriteItemsError, R>,
) -> RepositoryError {
    if let Some(mapped) = connection_failure(&err) {
        return mapped;
    }
    match err.into_service_error() {
        TransactWriteItemsError::TransactionCanceledException(cancelled) => {
            RepositoryError::TransactionCancelled(describe_cancellation(&cancelled))
        }
        TransactWriteItemsError::TransactionInProgressException(_) => {
            RepositoryError::TransactionFailed("Transaction in progress, please retry".to_string())
        }
        TransactWriteItemsError::ResourceNotFoundException(_) => {
            RepositoryError::TransactionFailed("Table not found".to_string())
        }
        TransactWriteItemsError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::TransactionFailed("Throughput exceeded, please retry".to_string())
        }
        TransactWriteItemsError::RequestLimitExceeded(_) => {
            RepositoryError::TransactionFailed("Request limit exceeded, please retry".to_string())
        }
        TransactWriteItemsError::InternalServerError(_) => {
            RepositoryError::TransactionFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::TransactionFailed(format!("TransactWriteItems failed: {:?}", err)),
    }
}

/// Render the per-operation cancellation codes, put first then delete.
///
/// Pattern: `[<code>, <code>]`, `None` for an operation that did not fail.
pub fn describe_cancellation(err: &TransactionCanceledException) -> String {
    let codes: Vec<&str> = err
        .cancellation_reasons()
        .iter()
        .map(|reason| reason.code().unwrap_or("None"))
        .collect();

    if codes.is_empty() {
        return err.message().unwrap_or("no reason given").to_string();
    }
    format!("[{}]", codes.join(", "))
}
