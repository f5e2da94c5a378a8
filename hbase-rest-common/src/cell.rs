//! Row and cell payloads returned by row reads and scanners.
//!
//! On the wire every `key`, `column` and `$` field is base64. A [`CellSet`]
//! is deserialized as-is and only turned into text by [`CellSet::decode`].

use serde::{Deserialize, Serialize};

use crate::codec::{self, DecodeError};

/// A batch of rows, as returned by `GET /{table}/{row}` or a scanner fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSet {
    #[serde(default, rename = "Row")]
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub key: String,
    #[serde(default, rename = "Cell")]
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Column name in `family:qualifier` form.
    pub column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(rename = "$")]
    pub value: String,
}

impl CellSet {
    /// Decode every row key, column name and value from base64.
    pub fn decode(mut self) -> Result<Self, DecodeError> {
        self.decode_in_place()?;
        Ok(self)
    }

    /// Decode in place. On error the set may be partially decoded.
    pub fn decode_in_place(&mut self) -> Result<(), DecodeError> {
        for row in &mut self.rows {
            row.key = codec::decode(&row.key)?;
            for cell in &mut row.cells {
                cell.column = codec::decode(&cell.column)?;
                cell.value = codec::decode(&cell.value)?;
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, key: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Total number of cells across all rows.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }
}

impl Row {
    /// Look up a cell by its full `family:qualifier` name.
    pub fn cell(&self, column: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.column == column)
    }

    pub fn value(&self, column: &str) -> Option<&str> {
        self.cell(column).map(|c| c.value.as_str())
    }
}

impl Cell {
    /// Split a decoded column name into family and qualifier.
    ///
    /// Returns `None` when the name has no `:` separator.
    pub fn family_and_qualifier(&self) -> Option<(&str, &str)> {
        self.column.split_once(':')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW_JSON: &str = r#"{
        "Row": [{
            "key": "MDAwMDAwMQ==",
            "Cell": [
                {"column": "dXNlcmluZm86cGhvbmU=", "timestamp": 1586070000000, "$": "MTM4MDAxMzgwMDA="}
            ]
        }]
    }"#;

    #[test]
    fn test_parse_encoded_cell_set() {
        let cells: CellSet = serde_json::from_str(ROW_JSON).unwrap();
        assert_eq!(cells.rows.len(), 1);
        assert_eq!(cells.rows[0].key, "MDAwMDAwMQ==");
        assert_eq!(cells.rows[0].cells[0].timestamp, Some(1586070000000));
    }

    #[test]
    fn test_decode_cell_set() {
        let cells: CellSet = serde_json::from_str(ROW_JSON).unwrap();
        let decoded = cells.decode().unwrap();

        let row = decoded.row("0000001").unwrap();
        assert_eq!(row.value("userinfo:phone"), Some("13800138000"));
        assert_eq!(
            row.cells[0].family_and_qualifier(),
            Some(("userinfo", "phone"))
        );
        assert_eq!(row.cells[0].timestamp, Some(1586070000000));
    }

    #[test]
    fn test_decode_rejects_bad_value() {
        let mut cells: CellSet = serde_json::from_str(ROW_JSON).unwrap();
        cells.rows[0].cells[0].value = "%%%".to_string();
        assert!(matches!(cells.decode(), Err(DecodeError::Base64 { .. })));
    }

    #[test]
    fn test_serialize_keeps_wire_names() {
        let cells = CellSet {
            rows: vec![Row {
                key: "cm93MQ==".to_string(),
                cells: vec![Cell {
                    column: "Y2Y6YQ==".to_string(),
                    timestamp: None,
                    value: "djE=".to_string(),
                }],
            }],
        };
        let json = serde_json::to_value(&cells).unwrap();
        assert_eq!(json["Row"][0]["Cell"][0]["$"], "djE=");
        assert!(json["Row"][0]["Cell"][0].get("timestamp").is_none());
    }

    #[test]
    fn test_counts() {
        let cells: CellSet = serde_json::from_str(ROW_JSON).unwrap();
        assert!(!cells.is_empty());
        assert_eq!(cells.cell_count(), 1);
        assert!(CellSet::default().is_empty());
    }

    #[test]
    fn test_column_without_family() {
        let cell = Cell {
            column: "bare".to_string(),
            timestamp: None,
            value: String::new(),
        };
        assert_eq!(cell.family_and_qualifier(), None);
    }
}
