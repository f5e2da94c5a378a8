//! # hbase-rest-client
//!
//! Client for the HBase REST gateway (`hbase rest start`).
//!
//! Every [`GatewayClient`] method maps to one gateway endpoint. Calls that
//! can legitimately answer with a non-success status return a
//! [`GatewayReply`] so callers branch on data vs. status explicitly.
//!
//! ```no_run
//! use hbase_rest_client::{GatewayClient, DEFAULT_SCAN_BATCH};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hbase_rest_client::Error> {
//!     let client = GatewayClient::new("localhost", 8080);
//!
//!     client.create_table("user", &["userinfo"]).await?;
//!     client.put("user", "userinfo", "phone", "0000001", "13800138000").await?;
//!
//!     if let Some(cells) = client.scan("user", DEFAULT_SCAN_BATCH, true).await?.data() {
//!         println!("{} rows", cells.rows.len());
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod reply;
mod scanner;

pub use client::{ColumnRef, GatewayClient, DEFAULT_PORT, DEFAULT_SCAN_BATCH};
pub use error::{Error, Result};
pub use reply::GatewayReply;
pub use scanner::Scanner;

pub use hbase_rest_common as common;
pub use hbase_rest_common::{
    Cell, CellSet, ClusterStatus, ClusterVersion, ColumnSchema, Row, TableList, TableSchema,
};
pub use reqwest::StatusCode;
