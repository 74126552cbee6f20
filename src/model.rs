//! Data model for PocketBase collections and records.
//!
//! These types mirror the wire format of the PocketBase collections API.
//! Records themselves stay untyped (`serde_json::Value`) because their shape
//! is determined by the owning collection's schema at write time; the typed
//! structures here cover what the server itself reads and manipulates:
//! collection descriptors, field schemas, indexes, and list pages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One field in a collection schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// A named index over one or more collection fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexModel {
    pub name: String,
    pub fields: Vec<String>,
    #[serde(default)]
    pub unique: bool,
}

/// A collection descriptor as returned by the collections API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionModel {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub schema: Vec<FieldSchema>,
    #[serde(default)]
    pub indexes: Vec<IndexModel>,
}

/// Partial collection update. Only the populated attributes are sent; the
/// backend leaves everything else untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Vec<FieldSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexes: Option<Vec<IndexModel>>,
}

impl CollectionUpdate {
    /// An update that only renames the collection.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// An update that replaces the whole index set.
    pub fn indexes(indexes: Vec<IndexModel>) -> Self {
        Self {
            indexes: Some(indexes),
            ..Self::default()
        }
    }
}

/// List-shaping parameters forwarded verbatim to a record list call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub expand: Option<String>,
}

/// One page of a record listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub items: Vec<Value>,
}
