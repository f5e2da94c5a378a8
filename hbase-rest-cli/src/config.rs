//! Configuration for the command-line client.

use std::path::Path;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use hbase_rest_client::{DEFAULT_PORT, DEFAULT_SCAN_BATCH};
use serde::Deserialize;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub read: ReadConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where the REST gateway lives.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Full base URL; takes precedence over host and port when set.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl GatewayConfig {
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.host, self.port),
        }
    }
}

/// Read-path behaviour for `get` and `scan`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadConfig {
    /// Decode base64 keys, columns and values before printing.
    #[serde(default = "default_true")]
    pub decode: bool,
    /// Scanner batch size when `--limit` is not given.
    #[serde(default = "default_scan_batch")]
    pub scan_batch: u32,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            decode: default_true(),
            scan_batch: default_scan_batch(),
        }
    }
}

// Default values
fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_true() -> bool {
    true
}
fn default_scan_batch() -> u32 {
    DEFAULT_SCAN_BATCH
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (HBASE_REST__SECTION__KEY format)
    /// 2. The file given with `--config`, or hbase-rest.toml if present
    /// 3. Built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("hbase-rest").required(false),
        };

        let config = ConfigLoader::builder()
            .set_default("gateway.host", default_host())?
            .set_default("gateway.port", default_port() as i64)?
            .set_default("read.decode", default_true())?
            .set_default("read.scan_batch", default_scan_batch() as i64)?
            .set_default("log_level", default_log_level())?
            .add_source(file)
            .add_source(
                Environment::with_prefix("HBASE_REST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_gateway_config() {
        let gateway = GatewayConfig::default();
        assert_eq!(gateway.host, "localhost");
        assert_eq!(gateway.port, 8080);
        assert_eq!(gateway.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let gateway = GatewayConfig {
            base_url: Some("http://hbase.internal:9090/".to_string()),
            ..GatewayConfig::default()
        };
        assert_eq!(gateway.base_url(), "http://hbase.internal:9090");
    }

    #[test]
    fn test_default_read_config() {
        let read = ReadConfig::default();
        assert!(read.decode);
        assert_eq!(read.scan_batch, 100_000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
log_level = "debug"

[gateway]
host = "hbase-master"
port = 8085

[read]
decode = false
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.gateway.host, "hbase-master");
        assert_eq!(config.gateway.port, 8085);
        assert!(!config.read.decode);
        assert_eq!(config.read.scan_batch, 100_000);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}
