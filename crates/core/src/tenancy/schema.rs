//! Entity key schema registry.
//!
//! The set of entity types stored in the single table is closed: every type
//! that has ever been persisted is declared here together with the attributes
//! its composite keys are built from. Anything else is unknown and is never
//! touched by the migration.

use std::fmt;

// ============================================================================
// Attribute names
// ============================================================================

pub const PK_ATTRIBUTE: &str = "PK";
pub const SK_ATTRIBUTE: &str = "SK";
pub const GSI1_PK_ATTRIBUTE: &str = "GSI1PK";
pub const GSI1_SK_ATTRIBUTE: &str = "GSI1SK";
pub const GSI2_PK_ATTRIBUTE: &str = "GSI2PK";
pub const GSI2_SK_ATTRIBUTE: &str = "GSI2SK";

/// Discriminator attribute identifying the business object of a record.
pub const ENTITY_TYPE_ATTRIBUTE: &str = "entityType";

/// Tenant attribute. Its presence marks a record as tenant-scoped.
pub const TENANT_ATTRIBUTE: &str = "organizationId";

// ============================================================================
// Key schema
// ============================================================================

/// Attributes that make up the composite keys of one entity type.
///
/// Attribute lists are ordered; segments are emitted in list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySchema {
    /// Fixed token naming the type inside sort keys.
    pub token: &'static str,
    /// Primary key suffix attributes.
    pub primary: &'static [&'static str],
    /// Sort key suffix attributes. Empty means the bare type token.
    pub sort: &'static [&'static str],
    /// Index 1 partition attributes, for types with a natural secondary access pattern.
    pub index1: Option<&'static [&'static str]>,
    /// Extra index 2 sort attributes placed before the record identity.
    pub index2: &'static [&'static str],
}

impl KeySchema {
    fn simple(token: &'static str, primary: &'static [&'static str]) -> Self {
        Self {
            token,
            primary,
            sort: &[],
            index1: None,
            index2: &[],
        }
    }

    fn with_sort(mut self, sort: &'static [&'static str]) -> Self {
        self.sort = sort;
        self
    }

    fn with_index1(mut self, index1: &'static [&'static str]) -> Self {
        self.index1 = Some(index1);
        self
    }

    fn with_index2(mut self, index2: &'static [&'static str]) -> Self {
        self.index2 = index2;
        self
    }
}

// ============================================================================
// Entity kinds
// ============================================================================

/// Every entity type persisted in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    PropertyType,
    Amenity,
    ExpenseCategory,
    Customer,
    User,
    Property,
    Unit,
    Lease,
    Resident,
    Invoice,
    Payment,
    MaintenanceRequest,
    Vendor,
}

/// Lookup and reference types visible to every organization.
pub const SHARED_KINDS: &[EntityKind] = &[
    EntityKind::PropertyType,
    EntityKind::Amenity,
    EntityKind::ExpenseCategory,
];

impl EntityKind {
    pub const ALL: [EntityKind; 13] = [
        EntityKind::PropertyType,
        EntityKind::Amenity,
        EntityKind::ExpenseCategory,
        EntityKind::Customer,
        EntityKind::User,
        EntityKind::Property,
        EntityKind::Unit,
        EntityKind::Lease,
        EntityKind::Resident,
        EntityKind::Invoice,
        EntityKind::Payment,
        EntityKind::MaintenanceRequest,
        EntityKind::Vendor,
    ];

    /// Stored discriminator value.
    pub fn discriminator(self) -> &'static str {
        match self {
            EntityKind::PropertyType => "propertyType",
            EntityKind::Amenity => "amenity",
            EntityKind::ExpenseCategory => "expenseCategory",
            EntityKind::Customer => "customer",
            EntityKind::User => "user",
            EntityKind::Property => "property",
            EntityKind::Unit => "unit",
            EntityKind::Lease => "lease",
            EntityKind::Resident => "resident",
            EntityKind::Invoice => "invoice",
            EntityKind::Payment => "payment",
            EntityKind::MaintenanceRequest => "maintenanceRequest",
            EntityKind::Vendor => "vendor",
        }
    }

    /// Resolves a stored discriminator. Matching is exact.
    pub fn from_discriminator(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.discriminator() == value)
    }

    /// Key schema for this type.
    pub fn schema(self) -> KeySchema {
        match self {
            EntityKind::PropertyType => {
                KeySchema::simple("PROPERTY_TYPE", &["propertyTypeId"])
            }
            EntityKind::Amenity => KeySchema::simple("AMENITY", &["amenityId"]),
            EntityKind::ExpenseCategory => {
                KeySchema::simple("EXPENSE_CATEGORY", &["expenseCategoryId"])
            }
            EntityKind::Customer => {
                KeySchema::simple("CUSTOMER", &["customerId"]).with_index1(&["email"])
            }
            EntityKind::User => KeySchema::simple("USER", &["userId"]).with_index1(&["email"]),
            EntityKind::Property => {
                KeySchema::simple("PROPERTY", &["propertyId"]).with_index1(&["customerId"])
            }
            EntityKind::Unit => KeySchema::simple("UNIT", &["propertyId"]).with_sort(&["unitId"]),
            EntityKind::Lease => KeySchema::simple("LEASE", &["leaseId"])
                .with_index1(&["unitId"])
                .with_index2(&["startDate"]),
            EntityKind::Resident => {
                KeySchema::simple("RESIDENT", &["residentId"]).with_index1(&["leaseId"])
            }
            EntityKind::Invoice => KeySchema::simple("INVOICE", &["invoiceId"])
                .with_index1(&["customerId"])
                .with_index2(&["dueDate"]),
            EntityKind::Payment => KeySchema::simple("PAYMENT", &["paymentId"])
                .with_index1(&["invoiceId"])
                .with_index2(&["paidAt"]),
            EntityKind::MaintenanceRequest => {
                KeySchema::simple("MAINTENANCE_REQUEST", &["maintenanceRequestId"])
                    .with_index1(&["propertyId"])
                    .with_index2(&["status"])
            }
            EntityKind::Vendor => KeySchema::simple("VENDOR", &["vendorId"]),
        }
    }

    /// Whether records of this type belong to every organization.
    pub fn is_shared(self) -> bool {
        SHARED_KINDS.contains(&self)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.discriminator())
    }
}
