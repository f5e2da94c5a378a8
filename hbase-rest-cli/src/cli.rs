//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "hbase-rest")]
#[command(about = "Client for the HBase REST gateway")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./hbase-rest.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Gateway host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Gateway port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Print keys, columns and values base64-encoded as received
    #[arg(long, global = true)]
    pub raw: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the cluster version
    Version,

    /// Show cluster status
    Status,

    /// List tables
    List,

    /// Show a table schema
    Schema {
        table: String,
    },

    /// Create a table, or add column families to an existing one
    Create {
        table: String,

        /// Column families
        #[arg(required = true)]
        families: Vec<String>,
    },

    /// Drop a table
    Drop {
        table: String,
    },

    /// Write a single cell
    Put {
        table: String,
        family: String,
        column: String,
        row: String,
        value: String,
    },

    /// Read a row
    Get {
        table: String,
        row: String,

        /// Restrict to one column (family:qualifier)
        #[arg(long)]
        column: Option<String>,
    },

    /// Read one batch of rows through a scanner
    Scan {
        table: String,

        /// Maximum cells in the batch
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Run a create/put/get/scan/drop walkthrough on table "user"
    Demo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_put() {
        let cli = Cli::try_parse_from([
            "hbase-rest", "put", "user", "userinfo", "phone", "0000001", "13800138000",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Put {
                table: "user".to_string(),
                family: "userinfo".to_string(),
                column: "phone".to_string(),
                row: "0000001".to_string(),
                value: "13800138000".to_string(),
            }
        );
        assert!(!cli.raw);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hbase-rest", "scan", "user", "--limit", "10", "--raw", "--port", "9090",
        ])
        .unwrap();
        assert!(cli.raw);
        assert_eq!(cli.port, Some(9090));
        assert_eq!(
            cli.command,
            Command::Scan {
                table: "user".to_string(),
                limit: Some(10),
            }
        );
    }

    #[test]
    fn test_create_requires_family() {
        assert!(Cli::try_parse_from(["hbase-rest", "create", "user"]).is_err());
    }
}
