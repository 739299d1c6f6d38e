//! Classification of raw items and construction of migrated items.
//!
//! A raw item is inspected once and turned either into a skip reason or into a
//! [`LegacyRecord`] tagged with its [`EntityKind`]. Key building afterwards
//! works on the tagged record only.

use std::fmt;

use super::attributes::{text, text_or_default, AttributeValue, Item};
use super::keys::{build_keys, KeySet};
use super::schema::{
    EntityKind, ENTITY_TYPE_ATTRIBUTE, GSI1_PK_ATTRIBUTE, GSI1_SK_ATTRIBUTE, GSI2_PK_ATTRIBUTE,
    GSI2_SK_ATTRIBUTE, PK_ATTRIBUTE, SK_ATTRIBUTE, TENANT_ATTRIBUTE,
};
use super::tenant::{TenantId, TenantResolver};

/// Why an item is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The item has no usable discriminator attribute.
    NoDiscriminator,
    /// The item already carries a tenant.
    AlreadyTenantScoped,
    /// The discriminator is not a declared entity type.
    UnknownType,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::NoDiscriminator => "no-discriminator",
            SkipReason::AlreadyTenantScoped => "already-tenant-scoped",
            SkipReason::UnknownType => "unknown-type",
        };
        f.write_str(reason)
    }
}

/// Result of inspecting a raw item.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification<V: AttributeValue> {
    Skip(SkipReason),
    Legacy(LegacyRecord<V>),
}

/// Inspect a raw item.
///
/// Checks run in a fixed order: discriminator, tenant, registry. Any tenant
/// value counts as assigned except the empty string.
pub fn classify<V: AttributeValue>(item: Item<V>) -> Classification<V> {
    let Some(discriminator) = text(&item, ENTITY_TYPE_ATTRIBUTE) else {
        return Classification::Skip(SkipReason::NoDiscriminator);
    };

    if has_tenant(&item) {
        return Classification::Skip(SkipReason::AlreadyTenantScoped);
    }

    match EntityKind::from_discriminator(&discriminator) {
        Some(kind) => Classification::Legacy(LegacyRecord { kind, item }),
        None => Classification::Skip(SkipReason::UnknownType),
    }
}

fn has_tenant<V: AttributeValue>(item: &Item<V>) -> bool {
    item.get(TENANT_ATTRIBUTE)
        .is_some_and(|tenant| tenant.as_key_text().as_deref() != Some(""))
}

/// A record of a declared type still stored in the tenant-less key format.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyRecord<V: AttributeValue> {
    kind: EntityKind,
    item: Item<V>,
}

impl<V: AttributeValue> LegacyRecord<V> {
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn item(&self) -> &Item<V> {
        &self.item
    }

    /// Legacy primary key as text, for reporting.
    pub fn legacy_pk(&self) -> String {
        text_or_default(&self.item, PK_ATTRIBUTE)
    }

    /// Key attributes identifying the stored legacy item.
    pub fn legacy_key(&self) -> Item<V> {
        [PK_ATTRIBUTE, SK_ATTRIBUTE]
            .into_iter()
            .filter_map(|name| {
                self.item
                    .get(name)
                    .map(|value| (name.to_string(), value.clone()))
            })
            .collect()
    }

    /// Build the tenant-scoped replacement for this record.
    pub fn plan(&self, resolver: &TenantResolver) -> MigrationPlan<V> {
        let tenant = resolver.resolve(self.kind);
        let keys = build_keys(&self.kind.schema(), &self.item, tenant.as_str());
        let new_item = migrated_item(&self.item, &tenant, &keys);

        MigrationPlan {
            kind: self.kind,
            tenant,
            keys,
            new_item,
            legacy_key: self.legacy_key(),
            legacy_pk: self.legacy_pk(),
        }
    }
}

/// Everything needed to replace one legacy record.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationPlan<V: AttributeValue> {
    pub kind: EntityKind,
    pub tenant: TenantId,
    pub keys: KeySet,
    pub new_item: Item<V>,
    pub legacy_key: Item<V>,
    pub legacy_pk: String,
}

/// Shallow copy of `item` with key, index and tenant attributes overwritten.
///
/// Index 1 attributes are removed for types without an index 1 schema so a
/// legacy value never keeps the record in that index.
fn migrated_item<V: AttributeValue>(item: &Item<V>, tenant: &TenantId, keys: &KeySet) -> Item<V> {
    let mut new_item = item.clone();

    set_text(&mut new_item, PK_ATTRIBUTE, &keys.pk);
    set_text(&mut new_item, SK_ATTRIBUTE, &keys.sk);
    set_text(&mut new_item, GSI2_PK_ATTRIBUTE, &keys.index2.pk);
    set_text(&mut new_item, GSI2_SK_ATTRIBUTE, &keys.index2.sk);
    set_text(&mut new_item, TENANT_ATTRIBUTE, tenant.as_str());
    match &keys.index1 {
        Some(index1) => {
            set_text(&mut new_item, GSI1_PK_ATTRIBUTE, &index1.pk);
            set_text(&mut new_item, GSI1_SK_ATTRIBUTE, &index1.sk);
        }
        None => {
            new_item.remove(GSI1_PK_ATTRIBUTE);
            new_item.remove(GSI1_SK_ATTRIBUTE);
        }
    }

    new_item
}

fn set_text<V: AttributeValue>(item: &mut Item<V>, name: &str, value: &str) {
    item.insert(name.to_string(), V::from_string(value.to_string()));
}
