//! DynamoDB repository implementation.
//!
//! Implements `MigrationStore` from `propman_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{Delete, Put, TransactWriteItem};
use aws_sdk_dynamodb::Client;

use propman_core::storage::{MigrationStore, RepositoryError, Result, ScanPage};
use propman_core::tenancy::Item;

use super::conversions::{from_core_item, to_core_item, DynamoAttr};
use super::error::{map_scan_error, map_transact_write_error};

/// The tenant-scoped copy must not already exist.
const PUT_CONDITION: &str = "attribute_not_exists(PK)";

/// The legacy copy must still exist.
const DELETE_CONDITION: &str = "attribute_exists(PK)";

/// DynamoDB-based migration store over a single table.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
    page_size: Option<i32>,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            page_size: None,
        }
    }

    /// Limits the number of items evaluated per scan page.
    pub fn with_page_size(mut self, page_size: Option<i32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl MigrationStore for DynamoDbRepository {
    type Value = DynamoAttr;

    async fn scan_page(
        &self,
        start_key: Option<Item<DynamoAttr>>,
    ) -> Result<ScanPage<DynamoAttr>> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_limit(self.page_size)
            .set_exclusive_start_key(start_key.map(from_core_item))
            .send()
            .await
            .map_err(map_scan_error)?;

        let items = result
            .items
            .unwrap_or_default()
            .into_iter()
            .map(to_core_item)
            .collect();

        Ok(ScanPage {
            items,
            last_evaluated_key: result.last_evaluated_key.map(to_core_item),
        })
    }

    async fn replace_item(
        &self,
        new_item: Item<DynamoAttr>,
        legacy_key: Item<DynamoAttr>,
    ) -> Result<()> {
        let put = Put::builder()
            .table_name(&self.table_name)
            .set_item(Some(from_core_item(new_item)))
            .condition_expression(PUT_CONDITION)
            .build()
            .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

        let delete = Delete::builder()
            .table_name(&self.table_name)
            .set_key(Some(from_core_item(legacy_key)))
            .condition_expression(DELETE_CONDITION)
            .build()
            .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

        self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().put(put).build())
            .transact_items(TransactWriteItem::builder().delete(delete).build())
            .send()
            .await
            .map_err(map_transact_write_error)?;

        Ok(())
    }
}
