//! Table schema as reported by `GET /{table}/schema`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Table descriptor.
///
/// Table-level attributes such as `IS_META` are kept verbatim in
/// `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    #[serde(default, rename = "ColumnSchema")]
    pub column_families: Vec<ColumnSchema>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

/// Column family descriptor (`VERSIONS`, `BLOOMFILTER`, `TTL`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl TableSchema {
    pub fn column_family(&self, name: &str) -> Option<&ColumnSchema> {
        self.column_families.iter().find(|cf| cf.name == name)
    }

    pub fn column_family_names(&self) -> Vec<&str> {
        self.column_families.iter().map(|cf| cf.name.as_str()).collect()
    }
}

impl ColumnSchema {
    /// Attribute value rendered as text, whether the gateway sent a string or a number.
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes.get(key).map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
