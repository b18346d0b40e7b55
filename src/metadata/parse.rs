// Copyright (c) 2025 Wherobots Dialect Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Result parsing for `DESCRIBE` output.
//!
//! The Wherobots SQL service answers `DESCRIBE` with tabular text rows of
//! `(col_name, data_type, comment)`. The output format is fragile, so all
//! scraping lives behind this module: cell trimming, header and partition
//! pseudo-row filtering, the two "table does not exist" patterns, and
//! leading type-token extraction.

use crate::error::Result;
use crate::metadata::type_mapping::wherobots_type_to_arrow;
use arrow_schema::DataType;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::warn;

/// Header pseudo-row emitted before the column list.
pub const COLUMN_HEADER_MARKER: &str = "# col_name";

/// Pseudo-row that starts the partition-column section. Everything at or
/// after this row is excluded from column introspection.
pub const PARTITION_MARKER: &str = "# Partition Information";

/// A column described by the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Declared type string, as reported by the service (e.g. `decimal(10,2)`).
    pub type_name: String,
    /// Mapped Arrow type; `DataType::Null` when the declared type is not
    /// recognized.
    pub data_type: DataType,
    /// Always true — the service does not report nullability.
    pub nullable: bool,
    /// Always absent — the service does not report defaults.
    pub default: Option<String>,
}

fn type_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\w+").expect("valid regex"))
}

fn missing_table_row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Table .* does not exist").expect("valid regex"))
}

/// Render a result cell as trimmed text. Non-string JSON values are
/// rendered with their JSON representation; null becomes empty.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Extract the leading word-token of a declared type string, e.g.
/// `decimal` from `decimal(10,2)`.
pub fn type_token(col_type: &str) -> Option<&str> {
    type_token_re().find(col_type).map(|m| m.as_str())
}

/// Whether a successful single-row `DESCRIBE` result is actually the
/// service's "Table ... does not exist" message.
pub fn is_missing_table_row(first_cell: &str) -> bool {
    missing_table_row_re().is_match(first_cell)
}

/// Whether an operational error message reports the given table as not
/// found. The match is case-sensitive and anchors on the escaped table
/// reference.
pub fn is_missing_table_error(message: &str, full_table: &str) -> bool {
    let pattern = format!(
        r"TExecuteStatementResp.*SemanticException.*Table not found {}",
        regex::escape(full_table)
    );
    Regex::new(&pattern)
        .map(|re| re.is_match(message))
        .unwrap_or(false)
}

/// Parse `DESCRIBE` result rows into column descriptors.
///
/// Cells are trimmed; rows with an empty first cell or the `# col_name`
/// header are dropped; parsing stops (exclusive) at the first
/// `# Partition Information` row so partition pseudo-columns are excluded.
/// Unrecognized type tokens map to `DataType::Null` with a warning — never
/// an error.
pub fn columns_from_describe(rows: &[Vec<Value>]) -> Result<Vec<ColumnDescriptor>> {
    let mut columns = Vec::new();

    for row in rows {
        let col_name = row.first().map(cell_text).unwrap_or_default();
        if col_name.is_empty() || col_name == COLUMN_HEADER_MARKER {
            continue;
        }
        if col_name == PARTITION_MARKER {
            break;
        }

        let col_type = row.get(1).map(cell_text).unwrap_or_default();
        // Try the full declared type first so decimal precision/scale
        // survives, then fall back to the leading token for types with
        // angle-bracket parameters like array<string>.
        let data_type = wherobots_type_to_arrow(&col_type)
            .or_else(|| type_token(&col_type).and_then(wherobots_type_to_arrow));
        let data_type = match data_type {
            Some(data_type) => data_type,
            None => {
                warn!(
                    "Did not recognize type '{}' of column '{}'",
                    col_type, col_name
                );
                DataType::Null
            }
        };

        columns.push(ColumnDescriptor {
            name: col_name,
            type_name: col_type,
            data_type,
            nullable: true,
            default: None,
        });
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(cells: &[(&str, &str, &str)]) -> Vec<Vec<Value>> {
        cells.iter()
            .map(|(name, ty, comment)| vec![json!(name), json!(ty), json!(comment)])
            .collect()
    }

    #[test]
    fn test_columns_from_describe_basic() {
        let rows = rows(&[("id", "int", ""), ("name", "string", "")]);
        let columns = columns_from_describe(&rows).unwrap();

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[0].type_name, "int");
        assert_eq!(columns[0].data_type, DataType::Int32);
        assert!(columns[0].nullable);
        assert!(columns[0].default.is_none());
        assert_eq!(columns[1].name, "name");
        assert_eq!(columns[1].data_type, DataType::Utf8);
    }

    #[test]
    fn test_columns_from_describe_stops_at_partition_marker() {
        let rows = rows(&[
            ("id", "int", ""),
            ("name", "string", ""),
            ("# Partition Information", "", ""),
            ("# col_name", "data_type", "comment"),
            ("name", "string", ""),
        ]);
        let columns = columns_from_describe(&rows).unwrap();

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[1].name, "name");
    }

    #[test]
    fn test_columns_from_describe_drops_header_and_blank_rows() {
        let rows = rows(&[
            ("# col_name", "data_type", "comment"),
            ("", "", ""),
            ("geometry", "geometry", ""),
        ]);
        let columns = columns_from_describe(&rows).unwrap();

        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name, "geometry");
        assert_eq!(columns[0].data_type, DataType::Utf8);
    }

    #[test]
    fn test_columns_from_describe_trims_cells() {
        let rows = vec![vec![json!("  id  "), json!(" bigint "), json!("")]];
        let columns = columns_from_describe(&rows).unwrap();

        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[0].type_name, "bigint");
        assert_eq!(columns[0].data_type, DataType::Int64);
    }

    #[test]
    fn test_columns_from_describe_unknown_type_falls_back_to_null() {
        let rows = rows(&[("blob", "quaternion(4)", "")]);
        let columns = columns_from_describe(&rows).unwrap();

        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].data_type, DataType::Null);
        assert_eq!(columns[0].type_name, "quaternion(4)");
    }

    #[test]
    fn test_columns_from_describe_parameterized_type() {
        let rows = rows(&[("price", "decimal(10,2)", "")]);
        let columns = columns_from_describe(&rows).unwrap();

        assert_eq!(columns[0].data_type, DataType::Decimal128(10, 2));
    }

    #[test]
    fn test_type_token() {
        assert_eq!(type_token("decimal(10,2)"), Some("decimal"));
        assert_eq!(type_token("int"), Some("int"));
        assert_eq!(type_token("array<string>"), Some("array"));
        assert_eq!(type_token(""), None);
        assert_eq!(type_token("(weird)"), None);
    }

    #[test]
    fn test_is_missing_table_row() {
        assert!(is_missing_table_row(
            "Table overture.places does not exist"
        ));
        assert!(!is_missing_table_row("id"));
        // Anchored at the start of the cell
        assert!(!is_missing_table_row(
            "note: Table overture.places does not exist"
        ));
    }

    #[test]
    fn test_is_missing_table_error() {
        let message = "TExecuteStatementResp(status=...): \
                       SemanticException [Error 10001]: Table not found \
                       wherobots_open_data.overture.places";
        assert!(is_missing_table_error(
            message,
            "wherobots_open_data.overture.places"
        ));
        // A different table does not match
        assert!(!is_missing_table_error(
            message,
            "wherobots_open_data.overture.buildings"
        ));
        // Case-sensitive
        assert!(!is_missing_table_error(
            &message.to_lowercase(),
            "wherobots_open_data.overture.places"
        ));
    }

    #[test]
    fn test_is_missing_table_error_escapes_table_reference() {
        // Dots in the table reference must not act as regex wildcards
        let message = "TExecuteStatementResp ... SemanticException ... \
                       Table not found wherobots_open_dataXoverture";
        assert!(!is_missing_table_error(
            message,
            "wherobots_open_data.overture"
        ));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!("  x  ")), "x");
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&json!(42)), "42");
    }
}
