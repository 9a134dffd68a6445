//! Generation request payloads and download size estimates.
//!
//! The generation backend receives the edited schema as a JSON body:
//!
//! ```json
//! {
//!   "columns": [
//!     {"column_name": "id", "column_type": "Numeric", "column_data_type": "Numeric", "modifier_list": ["PRIMARY KEY"]}
//!   ],
//!   "rowCount": 100,
//!   "outputFormat": "SQL (Insert Statements)"
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use datafactory_schema::{Dialect, GenerationRequest, OutputFormat, parse};
//!
//! let columns = parse("CREATE TABLE t (id INT PRIMARY KEY, tags TEXT[])", Dialect::PostgreSql);
//! let request = GenerationRequest::new(&columns, 100, OutputFormat::Csv).unwrap();
//! let body = request.to_json().unwrap();
//! assert!(body.contains(r#""column_type":"String[]""#));
//! assert!(body.contains(r#""rowCount":100"#));
//! ```

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::output::OutputFormat;
use crate::parser::Column;
use crate::types::ColumnType;

/// Number of rows requested for a preview.
pub const PREVIEW_ROW_COUNT: u64 = 10;

/// Estimated encoding overhead per row for SQL `INSERT` syntax.
const SQL_ROW_OVERHEAD: u64 = 50;

/// One column of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name.
    pub column_name: String,
    /// Semantic type, rendered with its `[]` suffix for arrays.
    pub column_type: ColumnType,
    /// Same value as `column_type`; the backend reads both.
    pub column_data_type: ColumnType,
    /// The modifier text as a single entry, or empty without a modifier.
    pub modifier_list: Vec<String>,
}

impl From<&Column> for ColumnInfo {
    fn from(column: &Column) -> Self {
        let modifier_list = if column.modifier.is_empty() {
            Vec::new()
        } else {
            vec![column.modifier.clone()]
        };
        Self {
            column_name: column.name.clone(),
            column_type: column.column_type,
            column_data_type: column.column_type,
            modifier_list,
        }
    }
}

/// The body of a data generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Columns to generate, in order.
    pub columns: Vec<ColumnInfo>,
    /// Number of rows to generate.
    pub row_count: u64,
    /// Format of the generated file.
    pub output_format: OutputFormat,
}

impl GenerationRequest {
    /// Build a request from edited columns.
    ///
    /// Sentinel columns are left out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRowCount`] if `row_count` is zero.
    pub fn new<'a>(
        columns: impl IntoIterator<Item = &'a Column>,
        row_count: u64,
        output_format: OutputFormat,
    ) -> Result<Self, Error> {
        if row_count == 0 {
            return Err(Error::InvalidRowCount(row_count));
        }
        Ok(Self {
            columns: columns
                .into_iter()
                .filter(|column| !column.is_sentinel())
                .map(ColumnInfo::from)
                .collect(),
            row_count,
            output_format,
        })
    }

    /// The fixed-size JSON request used to preview generated rows.
    #[must_use]
    pub fn preview<'a>(columns: impl IntoIterator<Item = &'a Column>) -> Self {
        Self {
            columns: columns
                .into_iter()
                .filter(|column| !column.is_sentinel())
                .map(ColumnInfo::from)
                .collect(),
            row_count: PREVIEW_ROW_COUNT,
            output_format: OutputFormat::Json,
        }
    }

    /// Serialize the request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the body cannot be encoded.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Read a request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the JSON is malformed or does not
    /// describe a request, and [`Error::InvalidRowCount`] if it asks for no
    /// rows.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let request: Self =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        if request.row_count == 0 {
            return Err(Error::InvalidRowCount(0));
        }
        Ok(request)
    }
}

/// Estimate the size of a generated file from one sample row.
///
/// Strings count two bytes per UTF-16 code unit, numbers eight bytes and
/// booleans one byte; other values count nothing. Text formats add their
/// per-row syntax overhead. Returns `None` when the sample has no fields or
/// no rows are requested.
#[must_use]
pub fn estimate_file_size(
    sample_row: &serde_json::Map<String, serde_json::Value>,
    output_format: OutputFormat,
    row_count: u64,
) -> Option<u64> {
    if sample_row.is_empty() || row_count == 0 {
        return None;
    }

    let fields = sample_row.len() as u64;
    let mut bytes_per_row: u64 = sample_row
        .values()
        .map(|value| match value {
            serde_json::Value::String(s) => s.encode_utf16().count() as u64 * 2,
            serde_json::Value::Number(_) => 8,
            serde_json::Value::Bool(_) => 1,
            _ => 0,
        })
        .sum();

    bytes_per_row += match output_format {
        OutputFormat::Json => fields * 4,
        OutputFormat::Csv => fields,
        OutputFormat::Sql => SQL_ROW_OVERHEAD,
        OutputFormat::Parquet | OutputFormat::Avro => 0,
    };

    Some(bytes_per_row.saturating_mul(row_count))
}

/// Render a byte count as `"N/A"`, `"512 B"`, `"1.5 KB"` or `"2.0 MB"`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    match bytes {
        0 => "N/A".to_string(),
        b if b < KIB => format!("{b} B"),
        b if b < MIB => one_decimal(b, KIB, "KB"),
        b => one_decimal(b, MIB, "MB"),
    }
}

/// `bytes / unit` rounded half up to one decimal place.
fn one_decimal(bytes: u64, unit: u64, suffix: &str) -> String {
    let tenths = bytes.saturating_mul(10).saturating_add(unit / 2) / unit;
    format!("{}.{} {suffix}", tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SemanticType;

    fn sample() -> serde_json::Map<String, serde_json::Value> {
        let value = serde_json::json!({"name": "Ada", "age": 36, "active": true, "note": null});
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_column_info_modifier_list() {
        let with = Column::new("id", ColumnType::new(SemanticType::Numeric), "PRIMARY KEY");
        let without = Column::new("tags", ColumnType::array(SemanticType::String), "");
        assert_eq!(ColumnInfo::from(&with).modifier_list, vec!["PRIMARY KEY"]);
        assert!(ColumnInfo::from(&without).modifier_list.is_empty());
        assert_eq!(
            ColumnInfo::from(&without).column_data_type,
            ColumnType::array(SemanticType::String)
        );
    }

    #[test]
    fn test_zero_rows_is_rejected() {
        assert_eq!(
            GenerationRequest::new(&Vec::<Column>::new(), 0, OutputFormat::Sql),
            Err(Error::InvalidRowCount(0))
        );
    }

    #[test]
    fn test_estimate_per_format() {
        // "Ada" = 6, 36 = 8, true = 1, null = 0
        let row = sample();
        assert_eq!(estimate_file_size(&row, OutputFormat::Json, 1), Some(15 + 16));
        assert_eq!(estimate_file_size(&row, OutputFormat::Csv, 2), Some((15 + 4) * 2));
        assert_eq!(estimate_file_size(&row, OutputFormat::Sql, 1), Some(65));
        assert_eq!(estimate_file_size(&row, OutputFormat::Avro, 10), Some(150));
        assert_eq!(estimate_file_size(&row, OutputFormat::Avro, 0), None);
        assert_eq!(
            estimate_file_size(&serde_json::Map::new(), OutputFormat::Json, 5),
            None
        );
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "N/A");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.0 MB");
    }
}
