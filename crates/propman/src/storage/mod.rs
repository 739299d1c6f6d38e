//! Storage backend implementations.
//!
//! This module provides concrete implementations of
//! `propman_core::storage::MigrationStore`.
//!
//! - `dynamodb`: AWS DynamoDB backend using `aws-sdk-dynamodb`, used by the
//!   migration binary.
//! - `inmemory`: ordered in-memory table used to exercise full runs in tests.

pub mod dynamodb;

#[cfg(test)]
pub mod inmemory;

pub use dynamodb::DynamoDbRepository;
