//! Gateway client implementation.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use hbase_rest_common::{
    CellPut, CellSet, ClusterStatus, ClusterVersion, ScannerSpec, TableList, TableSchema,
    TableSchemaRequest,
};

use crate::error::{Error, Result};
use crate::reply::GatewayReply;
use crate::scanner::Scanner;

/// Port the gateway listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 8080;

/// Scanner batch size used when the caller has no preference.
pub const DEFAULT_SCAN_BATCH: u32 = 100_000;

const JSON: &str = "application/json";
const XML: &str = "text/xml";

/// Characters left unescaped in a path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A single column addressed as `family:qualifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef<'a> {
    pub family: &'a str,
    pub qualifier: &'a str,
}

impl<'a> ColumnRef<'a> {
    pub fn new(family: &'a str, qualifier: &'a str) -> Self {
        Self { family, qualifier }
    }

    /// Parse `family:qualifier`. The qualifier may itself contain `:`.
    pub fn parse(column: &'a str) -> Option<Self> {
        let (family, qualifier) = column.split_once(':')?;
        if family.is_empty() || qualifier.is_empty() {
            return None;
        }
        Some(Self { family, qualifier })
    }
}

/// HBase REST gateway client.
///
/// Holds only the gateway base URL and an HTTP client; no state is kept
/// between calls.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http_client: Client,
    base_url: String,
}

impl GatewayClient {
    /// Client for `http://{host}:{port}`.
    pub fn new(host: &str, port: u16) -> Self {
        Self::with_base_url(&format!("http://{}:{}", host, port))
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self::with_http_client(base_url, Client::new())
    }

    pub fn with_http_client(base_url: &str, http_client: Client) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Cluster metadata
    // ========================================================================

    /// `GET /version/cluster`. The body is parsed whatever the status.
    pub async fn cluster_version(&self) -> Result<ClusterVersion> {
        self.get_json(&self.url(&["version", "cluster"])).await
    }

    /// `GET /status/cluster`. The body is parsed whatever the status.
    pub async fn cluster_status(&self) -> Result<ClusterStatus> {
        self.get_json(&self.url(&["status", "cluster"])).await
    }

    /// `GET /`.
    pub async fn table_list(&self) -> Result<TableList> {
        self.get_json(&self.url(&[])).await
    }

    // ========================================================================
    // Table schema
    // ========================================================================

    /// `GET /{table}/schema`. Any status other than 200 is returned as is.
    pub async fn table_schema(&self, table: &str) -> Result<GatewayReply<TableSchema>> {
        let url = self.url(&[table, "schema"]);
        let response = self
            .send(self.request(Method::GET, &url).header(ACCEPT, JSON))
            .await?;

        if response.status() != StatusCode::OK {
            return Ok(GatewayReply::Status(response.status()));
        }

        Ok(GatewayReply::Data(parse_json(response).await?))
    }

    /// Create `table`, or add column families to it if it already exists.
    ///
    /// The gateway answers 201 for a new table and 200 when an existing
    /// table was altered.
    pub async fn create_table<S: AsRef<str>>(
        &self,
        table: &str,
        column_families: &[S],
    ) -> Result<StatusCode> {
        let url = self.url(&[table, "schema"]);
        let body = TableSchemaRequest::new(table, column_families).to_xml();

        let response = self
            .send(
                self.request(Method::POST, &url)
                    .header(CONTENT_TYPE, XML)
                    .body(body),
            )
            .await?;

        let status = response.status();
        match status {
            StatusCode::CREATED => tracing::info!("Table {} created", table),
            StatusCode::OK => tracing::info!("Table {} schema updated", table),
            _ => tracing::debug!("Create table {} returned {}", table, status),
        }
        Ok(status)
    }

    /// `DELETE /{table}/schema`. 200 on success, 404 if the table does not exist.
    pub async fn drop_table(&self, table: &str) -> Result<StatusCode> {
        let url = self.url(&[table, "schema"]);
        let response = self.send(self.request(Method::DELETE, &url)).await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("Table {} dropped", table);
        }
        Ok(status)
    }

    // ========================================================================
    // Cells
    // ========================================================================

    /// Write one cell, creating the column if needed and overwriting any
    /// current value.
    ///
    /// The row key travels in the body, so the path uses a placeholder row.
    /// Returns 200 on success and 404 if the table or family is missing.
    pub async fn put(
        &self,
        table: &str,
        column_family: &str,
        column: &str,
        row_key: &str,
        value: &str,
    ) -> Result<StatusCode> {
        let url = self.url(&[table, "fakeRow"]);
        let body = CellPut::new(column_family, column, row_key, value).to_xml();

        let response = self
            .send(
                self.request(Method::PUT, &url)
                    .header(CONTENT_TYPE, XML)
                    .body(body),
            )
            .await?;

        Ok(response.status())
    }

    /// Read one row, or a single column of it.
    ///
    /// With `decode` set, keys, columns and values come back as text;
    /// otherwise they are left base64-encoded as sent by the gateway.
    pub async fn get(
        &self,
        table: &str,
        row: &str,
        column: Option<ColumnRef<'_>>,
        decode: bool,
    ) -> Result<GatewayReply<CellSet>> {
        let url = match column {
            Some(column) => format!(
                "{}/{}:{}",
                self.url(&[table, row]),
                encode_segment(column.family),
                encode_segment(column.qualifier)
            ),
            None => self.url(&[table, row]),
        };

        let response = self
            .send(self.request(Method::GET, &url).header(ACCEPT, JSON))
            .await?;

        if response.status() != StatusCode::OK {
            return Ok(GatewayReply::Status(response.status()));
        }

        let cells: CellSet = parse_json(response).await?;
        Ok(GatewayReply::Data(decode_if(cells, decode)?))
    }

    // ========================================================================
    // Scanners
    // ========================================================================

    /// Create a server-side scanner over `table` returning up to `batch`
    /// cells per fetch.
    ///
    /// Returns the creation status unless it is 201.
    pub async fn open_scanner(&self, table: &str, batch: u32) -> Result<GatewayReply<Scanner>> {
        let url = self.url(&[table, "scanner"]);

        let response = self
            .send(
                self.request(Method::PUT, &url)
                    .header(CONTENT_TYPE, XML)
                    .body(ScannerSpec::new(batch).to_xml()),
            )
            .await?;

        if response.status() != StatusCode::CREATED {
            return Ok(GatewayReply::Status(response.status()));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(Error::MissingLocation)?;

        let location = self.resolve_location(location)?;
        tracing::debug!("Opened scanner {}", location);
        Ok(GatewayReply::Data(Scanner::new(
            self.http_client.clone(),
            location,
        )))
    }

    /// Fetch a single batch of up to `limit` cells from `table`.
    ///
    /// The scanner is always deleted before returning, including when the
    /// fetch itself failed.
    pub async fn scan(&self, table: &str, limit: u32, decode: bool) -> Result<GatewayReply<CellSet>> {
        let scanner = match self.open_scanner(table, limit).await? {
            GatewayReply::Data(scanner) => scanner,
            GatewayReply::Status(status) => return Ok(GatewayReply::Status(status)),
        };

        let fetched = scanner.fetch().await;

        let location = scanner.location().to_string();
        match scanner.close().await {
            Ok(status) if !status.is_success() => {
                tracing::warn!("Closing scanner {} returned {}", location, status);
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Failed to close scanner {}: {}", location, e),
        }

        Ok(GatewayReply::Data(decode_if(fetched?, decode)?))
    }

    // ========================================================================
    // Request helpers
    // ========================================================================

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        if segments.is_empty() {
            url.push('/');
        }
        for segment in segments {
            url.push('/');
            url.push_str(&encode_segment(segment));
        }
        url
    }

    /// Resolve a scanner `Location` against the base URL.
    ///
    /// The base is treated as a directory, so relative locations land under
    /// its path and absolute paths replace it.
    fn resolve_location(&self, location: &str) -> Result<String> {
        let base = Url::parse(&format!("{}/", self.base_url))
            .map_err(|e| Error::InvalidUrl(format!("invalid base_url {}: {}", self.base_url, e)))?;
        let resolved = base
            .join(location)
            .map_err(|e| Error::InvalidUrl(format!("invalid Location {}: {}", location, e)))?;
        Ok(resolved.to_string())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        tracing::debug!(method = %method, url = %url, "Gateway request");
        self.http_client.request(method, url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Communication(e.to_string()))?;

        tracing::debug!(status = %response.status().as_u16(), "Gateway response");
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .send(self.request(Method::GET, url).header(ACCEPT, JSON))
            .await?;
        parse_json(response).await
    }
}

pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    response
        .json()
        .await
        .map_err(|e| Error::InvalidResponse(format!("{} ({})", e, status)))
}

fn decode_if(cells: CellSet, decode: bool) -> Result<CellSet> {
    if decode {
        Ok(cells.decode()?)
    } else {
        Ok(cells)
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_from_host_and_port() {
        let client = GatewayClient::new("localhost", DEFAULT_PORT);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_base_url_normalization() {
        let client = GatewayClient::with_base_url("http://gateway:8080/");
        assert_eq!(client.base_url(), "http://gateway:8080");
    }

    #[test]
    fn test_url_building() {
        let client = GatewayClient::with_base_url("http://gateway:8080");
        assert_eq!(client.url(&[]), "http://gateway:8080/");
        assert_eq!(
            client.url(&["version", "cluster"]),
            "http://gateway:8080/version/cluster"
        );
        assert_eq!(client.url(&["user", "schema"]), "http://gateway:8080/user/schema");
    }

    #[test]
    fn test_url_segments_are_encoded() {
        let client = GatewayClient::with_base_url("http://gateway:8080");
        assert_eq!(
            client.url(&["user", "row 1/a"]),
            "http://gateway:8080/user/row%201%2Fa"
        );
        assert_eq!(client.url(&["t", "ключ"]), "http://gateway:8080/t/%D0%BA%D0%BB%D1%8E%D1%87");
        assert_eq!(client.url(&["t", "a-b_c.d~e"]), "http://gateway:8080/t/a-b_c.d~e");
    }

    #[test]
    fn test_resolve_location() {
        let client = GatewayClient::with_base_url("http://gateway:8080");
        assert_eq!(
            client.resolve_location("http://other:8080/user/scanner/1").unwrap(),
            "http://other:8080/user/scanner/1"
        );
        assert_eq!(
            client.resolve_location("/user/scanner/1").unwrap(),
            "http://gateway:8080/user/scanner/1"
        );
        assert_eq!(
            client.resolve_location("user/scanner/1").unwrap(),
            "http://gateway:8080/user/scanner/1"
        );
    }

    #[test]
    fn test_resolve_location_under_path_prefix() {
        let client = GatewayClient::with_base_url("http://proxy:8080/hbase/");
        assert_eq!(
            client.resolve_location("/hbase/user/scanner/1").unwrap(),
            "http://proxy:8080/hbase/user/scanner/1"
        );
        assert_eq!(
            client.resolve_location("user/scanner/1").unwrap(),
            "http://proxy:8080/hbase/user/scanner/1"
        );
        assert_eq!(
            client.resolve_location("http://proxy:8080/hbase/user/scanner/2").unwrap(),
            "http://proxy:8080/hbase/user/scanner/2"
        );
    }

    #[test]
    fn test_resolve_location_with_invalid_base() {
        let client = GatewayClient::with_base_url("not a url");
        let err = client.resolve_location("/user/scanner/1").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_column_ref_parse() {
        assert_eq!(
            ColumnRef::parse("userinfo:phone"),
            Some(ColumnRef::new("userinfo", "phone"))
        );
        assert_eq!(ColumnRef::parse("cf:a:b"), Some(ColumnRef::new("cf", "a:b")));
        assert_eq!(ColumnRef::parse("nocolon"), None);
        assert_eq!(ColumnRef::parse(":q"), None);
        assert_eq!(ColumnRef::parse("cf:"), None);
    }
}
