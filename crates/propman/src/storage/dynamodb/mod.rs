//! DynamoDB storage backend implementation.
//!
//! Implements `MigrationStore` on top of `aws-sdk-dynamodb`: paginated `Scan`
//! for reads and a two-item `TransactWriteItems` for the put+delete swap.

mod client;
mod conversions;
mod error;
mod repository;

pub use client::{create_client, AwsConfig};
pub use repository::DynamoDbRepository;
