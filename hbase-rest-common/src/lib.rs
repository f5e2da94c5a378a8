//! HBase REST Common Types
//!
//! Wire models and encoding helpers shared by the gateway client and the
//! command-line front-end.

pub mod cell;
pub mod cluster;
pub mod codec;
pub mod schema;
pub mod xml;

pub use cell::{Cell, CellSet, Row};
pub use cluster::{ClusterStatus, ClusterVersion, LiveNode, TableList, TableName};
pub use codec::DecodeError;
pub use schema::{ColumnSchema, TableSchema};
pub use xml::{CellPut, ScannerSpec, TableSchemaRequest};
