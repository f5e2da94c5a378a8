//! XML request documents accepted by the gateway.
//!
//! The gateway takes writes as small fixed-shape XML documents. They are
//! rendered with `format!` and escaped here, there is no general XML model.

use crate::codec;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const XML_DECLARATION_STANDALONE: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Escape text for use inside an XML attribute or element.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Table creation / column family addition (`POST /{table}/schema`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchemaRequest {
    pub table: String,
    pub column_families: Vec<String>,
}

impl TableSchemaRequest {
    pub fn new<S: AsRef<str>>(table: &str, column_families: &[S]) -> Self {
        Self {
            table: table.to_string(),
            column_families: column_families
                .iter()
                .map(|cf| cf.as_ref().to_string())
                .collect(),
        }
    }

    pub fn to_xml(&self) -> String {
        let columns: String = self
            .column_families
            .iter()
            .map(|cf| format!(r#"<ColumnSchema name="{}" />"#, escape(cf)))
            .collect();

        format!(
            r#"{}<TableSchema name="{}">{}</TableSchema>"#,
            XML_DECLARATION,
            escape(&self.table),
            columns
        )
    }
}

/// A single cell write (`PUT /{table}/fakeRow`).
///
/// Holds plain text; base64 encoding happens when the document is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPut {
    pub row_key: String,
    pub column_family: String,
    pub column: String,
    pub value: String,
}

impl CellPut {
    pub fn new(column_family: &str, column: &str, row_key: &str, value: &str) -> Self {
        Self {
            row_key: row_key.to_string(),
            column_family: column_family.to_string(),
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    /// The `family:qualifier` column name.
    pub fn column_name(&self) -> String {
        format!("{}:{}", self.column_family, self.column)
    }

    pub fn to_xml(&self) -> String {
        // base64 output never needs escaping
        format!(
            r#"{}<CellSet><Row key="{}"><Cell column="{}">{}</Cell></Row></CellSet>"#,
            XML_DECLARATION_STANDALONE,
            codec::encode(&self.row_key),
            codec::encode(&self.column_name()),
            codec::encode(&self.value)
        )
    }
}

/// Scanner creation request (`PUT /{table}/scanner`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerSpec {
    /// Maximum number of cells returned per fetch.
    pub batch: u32,
}

impl ScannerSpec {
    pub fn new(batch: u32) -> Self {
        Self { batch }
    }

    pub fn to_xml(&self) -> String {
        format!(r#"<Scanner batch="{}"/>"#, self.batch)
    }
}
