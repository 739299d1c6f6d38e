//! Composite key generation for tenant-scoped records.
//!
//! Pure functions: identical schema, item and tenant always produce identical
//! keys. Missing attributes serialize as an empty value.

use super::attributes::{text_or_default, AttributeValue, Item};
use super::schema::{KeySchema, TENANT_ATTRIBUTE};

/// Leading token of every tenant-scoped partition key.
pub const ROOT_TOKEN: &str = "ROOT";

/// Separator between key segments.
pub const DELIMITER: &str = "#";

/// A partition/sort key pair for a secondary index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexKeys {
    pub pk: String,
    pub sk: String,
}

/// Every key written for a migrated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySet {
    pub pk: String,
    pub sk: String,
    pub index1: Option<IndexKeys>,
    pub index2: IndexKeys,
}

/// Format one key segment.
///
/// Pattern: `<lowercased attribute name>_<value>`
pub fn segment(name: &str, value: &str) -> String {
    format!("{}_{}", name.to_lowercase(), value)
}

fn attribute_segments<V: AttributeValue>(attributes: &[&str], item: &Item<V>) -> Vec<String> {
    attributes
        .iter()
        .map(|name| segment(name, &text_or_default(item, name)))
        .collect()
}

fn join(parts: impl IntoIterator<Item = String>) -> String {
    parts.into_iter().collect::<Vec<_>>().join(DELIMITER)
}

/// Pattern: `ROOT#organizationid_<tenant>`
fn tenant_prefix(tenant_id: &str) -> String {
    format!("{ROOT_TOKEN}{DELIMITER}{}", segment(TENANT_ATTRIBUTE, tenant_id))
}

/// Record identity suffix shared by index sort keys.
///
/// Pattern: `<primary segments...>[#<sort segments...>]`
fn identity_segments<V: AttributeValue>(schema: &KeySchema, item: &Item<V>) -> Vec<String> {
    let mut segments = attribute_segments(schema.primary, item);
    segments.extend(attribute_segments(schema.sort, item));
    segments
}

/// Generate the tenant-scoped primary key.
///
/// Pattern: `ROOT#organizationid_<tenant>#<primary segments...>`
pub fn build_primary_key<V: AttributeValue>(
    schema: &KeySchema,
    item: &Item<V>,
    tenant_id: &str,
) -> String {
    join(
        std::iter::once(tenant_prefix(tenant_id)).chain(attribute_segments(schema.primary, item)),
    )
}

/// Generate the sort key.
///
/// Pattern: `<TOKEN>[#<sort segments...>]`, the bare token when the schema has
/// no sort attributes.
pub fn build_sort_key<V: AttributeValue>(schema: &KeySchema, item: &Item<V>) -> String {
    join(std::iter::once(schema.token.to_string()).chain(attribute_segments(schema.sort, item)))
}

/// Generate index 1 keys, for types with a natural secondary access pattern.
///
/// Pattern: `ROOT#organizationid_<tenant>#<index1 segments...>` /
/// `<TOKEN>#<identity segments...>`
pub fn build_index1_keys<V: AttributeValue>(
    schema: &KeySchema,
    item: &Item<V>,
    tenant_id: &str,
) -> Option<IndexKeys> {
    let attributes = schema.index1?;
    Some(IndexKeys {
        pk: join(
            std::iter::once(tenant_prefix(tenant_id)).chain(attribute_segments(attributes, item)),
        ),
        sk: join(
            std::iter::once(schema.token.to_string()).chain(identity_segments(schema, item)),
        ),
    })
}

/// Generate index 2 keys, used to enumerate every record of a type in a tenant.
///
/// Pattern: `ROOT#organizationid_<tenant>#<TOKEN>` /
/// `<TOKEN>[#<index2 segments...>]#<identity segments...>`
pub fn build_index2_keys<V: AttributeValue>(
    schema: &KeySchema,
    item: &Item<V>,
    tenant_id: &str,
) -> IndexKeys {
    IndexKeys {
        pk: join([tenant_prefix(tenant_id), schema.token.to_string()]),
        sk: join(
            std::iter::once(schema.token.to_string())
                .chain(attribute_segments(schema.index2, item))
                .chain(identity_segments(schema, item)),
        ),
    }
}

/// Generate every key of a migrated record.
pub fn build_keys<V: AttributeValue>(
    schema: &KeySchema,
    item: &Item<V>,
    tenant_id: &str,
) -> KeySet {
    KeySet {
        pk: build_primary_key(schema, item, tenant_id),
        sk: build_sort_key(schema, item),
        index1: build_index1_keys(schema, item, tenant_id),
        index2: build_index2_keys(schema, item, tenant_id),
    }
}
