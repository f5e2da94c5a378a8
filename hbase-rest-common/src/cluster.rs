//! Cluster metadata responses.

use serde::{Deserialize, Serialize};

/// Response from `GET /version/cluster`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterVersion {
    #[serde(rename = "Version")]
    pub version: String,
}

/// Response from `GET /status/cluster`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterStatus {
    #[serde(default)]
    pub regions: u64,
    #[serde(default)]
    pub requests: u64,
    #[serde(default, rename = "averageLoad")]
    pub average_load: f64,
    #[serde(default, rename = "LiveNodes")]
    pub live_nodes: Vec<LiveNode>,
    #[serde(default, rename = "DeadNodes")]
    pub dead_nodes: Vec<String>,
}

/// A region server reported as alive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiveNode {
    pub name: String,
    #[serde(default, rename = "startCode")]
    pub start_code: Option<u64>,
    #[serde(default)]
    pub requests: u64,
    #[serde(default, rename = "heapSizeMB")]
    pub heap_size_mb: Option<u64>,
    #[serde(default, rename = "maxHeapSizeMB")]
    pub max_heap_size_mb: Option<u64>,
    /// Per-region load details, passed through as reported.
    #[serde(default, rename = "Region")]
    pub regions: Vec<serde_json::Value>,
}

/// Response from `GET /`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableList {
    #[serde(default, rename = "table")]
    pub tables: Vec<TableName>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableName {
    pub name: String,
}

impl TableList {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    pub fn contains(&self, table: &str) -> bool {
        self.names().any(|name| name == table)
    }
}
