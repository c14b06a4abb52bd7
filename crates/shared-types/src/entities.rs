//! # Core Domain Entities
//!
//! Defines the entity kinds the console manages and the generic record type
//! their bodies travel in.
//!
//! ## Clusters
//!
//! - **Catalog**: Category, Product
//! - **Partners**: Supplier, Manufacturer
//! - **Sales**: Order
//! - **Store**: `StoreSetting`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::errors::UnknownEntityKind;

/// Field every list item and detail record is identified by.
pub const ID_FIELD: &str = "code";

/// Field `UpdateStatus` rewrites in place.
pub const STATUS_FIELD: &str = "status";

/// Field carrying the tenant scope in write bodies and list queries.
pub const SCOPE_FIELD: &str = "storeId";

// =============================================================================
// ENTITY KINDS
// =============================================================================

/// Every entity type that owns a slice in the entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Category,
    Product,
    Supplier,
    Manufacturer,
    Order,
    StoreSetting,
}

impl EntityKind {
    /// All kinds, in slice order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Category,
        EntityKind::Product,
        EntityKind::Supplier,
        EntityKind::Manufacturer,
        EntityKind::Order,
        EntityKind::StoreSetting,
    ];

    /// The configuration record for this kind.
    #[must_use]
    pub fn config(self) -> &'static EntityConfig {
        match self {
            Self::Category => &CATEGORY,
            Self::Product => &PRODUCT,
            Self::Supplier => &SUPPLIER,
            Self::Manufacturer => &MANUFACTURER,
            Self::Order => &ORDER,
            Self::StoreSetting => &STORE_SETTING,
        }
    }

    /// Plural path segment on the remote API (`/<path>[/<id>]`).
    #[must_use]
    pub fn path(self) -> &'static str {
        self.config().path
    }

    /// Key of this kind's slice in the entity store.
    #[must_use]
    pub fn slice_key(self) -> &'static str {
        self.config().slice_key
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slice_key())
    }
}

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    /// Accepts the slice key (`category`) or the API path (`categories`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.slice_key() == needle || kind.path() == needle)
            .ok_or(UnknownEntityKind(needle))
    }
}

// =============================================================================
// PER-KIND CONFIGURATION
// =============================================================================

/// Static description of one entity kind.
///
/// Routines and reducers are generic; everything that differs between kinds
/// is read from here.
#[derive(Debug, PartialEq, Eq)]
pub struct EntityConfig {
    pub kind: EntityKind,
    /// Plural API path segment.
    pub path: &'static str,
    /// Slice key in the store.
    pub slice_key: &'static str,
    /// Fields that must be present before a Submit may reach the gateway.
    pub required_fields: &'static [&'static str],
    /// The detail record is addressed by the store id itself rather than by
    /// an entity code (store settings).
    pub keyed_by_scope: bool,
}

static CATEGORY: EntityConfig = EntityConfig {
    kind: EntityKind::Category,
    path: "categories",
    slice_key: "category",
    required_fields: &["name"],
    keyed_by_scope: false,
};

static PRODUCT: EntityConfig = EntityConfig {
    kind: EntityKind::Product,
    path: "products",
    slice_key: "product",
    required_fields: &["name"],
    keyed_by_scope: false,
};

static SUPPLIER: EntityConfig = EntityConfig {
    kind: EntityKind::Supplier,
    path: "suppliers",
    slice_key: "supplier",
    required_fields: &["name", "contact", "countryId", "address"],
    keyed_by_scope: false,
};

static MANUFACTURER: EntityConfig = EntityConfig {
    kind: EntityKind::Manufacturer,
    path: "manufacturers",
    slice_key: "manufacturer",
    required_fields: &["name", "contact", "countryId", "address"],
    keyed_by_scope: false,
};

static ORDER: EntityConfig = EntityConfig {
    kind: EntityKind::Order,
    path: "orders",
    slice_key: "order",
    required_fields: &[
        "customerName",
        "customerContact",
        "shippingAddress",
        "billingAddress",
    ],
    keyed_by_scope: false,
};

static STORE_SETTING: EntityConfig = EntityConfig {
    kind: EntityKind::StoreSetting,
    path: "stores",
    slice_key: "store-setting",
    required_fields: &["name", "currencyId"],
    keyed_by_scope: true,
};

// =============================================================================
// SCOPE
// =============================================================================

/// Tenant (store) identifier every operation executes under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(String);

impl StoreId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoreId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// A JSON object as returned by the API for one entity (summary or full).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value; `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<Value>) {
        self.0.insert(field.to_string(), value.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// The entity code, if the record carries one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.get_str(ID_FIELD)
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.get_str(STATUS_FIELD)
    }

    /// Replace only the status field.
    pub fn set_status(&mut self, status: &str) {
        self.insert(STATUS_FIELD, status);
    }

    /// A field is present when it is not null and, for strings, not blank.
    #[must_use]
    pub fn is_present(&self, field: &str) -> bool {
        match self.0.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
