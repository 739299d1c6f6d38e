use async_trait::async_trait;

use crate::tenancy::{AttributeValue, Item};

use super::{Result, ScanPage};

/// Storage operations the tenancy migration depends on.
///
/// A backend must offer a paginated full scan and an all-or-nothing
/// transaction that writes one item and deletes another.
#[async_trait]
pub trait MigrationStore: Send + Sync {
    /// Attribute value representation used by the backend.
    type Value: AttributeValue;

    /// Reads one page of raw items, starting after `start_key` when given.
    async fn scan_page(&self, start_key: Option<Item<Self::Value>>)
        -> Result<ScanPage<Self::Value>>;

    /// Atomically puts `new_item` and deletes the item identified by `legacy_key`.
    ///
    /// The put must not overwrite an existing item and the delete must find
    /// the legacy item. Either both take effect or neither does.
    async fn replace_item(
        &self,
        new_item: Item<Self::Value>,
        legacy_key: Item<Self::Value>,
    ) -> Result<()>;
}
