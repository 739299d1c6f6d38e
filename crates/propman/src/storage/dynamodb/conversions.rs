//! Conversions between SDK attribute maps and migration items.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use propman_core::tenancy::{self, Item};

/// DynamoDB attribute value as seen by the migration core.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamoAttr(pub AttributeValue);

impl tenancy::AttributeValue for DynamoAttr {
    fn from_string(value: String) -> Self {
        DynamoAttr(AttributeValue::S(value))
    }

    fn as_key_text(&self) -> Option<String> {
        match &self.0 {
            AttributeValue::S(s) => Some(s.clone()),
            AttributeValue::N(n) => Some(n.clone()),
            AttributeValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Wrap an SDK attribute map.
pub fn to_core_item(item: HashMap<String, AttributeValue>) -> Item<DynamoAttr> {
    item.into_iter().map(|(k, v)| (k, DynamoAttr(v))).collect()
}

/// Unwrap into an SDK attribute map.
pub fn from_core_item(item: Item<DynamoAttr>) -> HashMap<String, AttributeValue> {
    item.into_iter().map(|(k, v)| (k, v.0)).collect()
}
