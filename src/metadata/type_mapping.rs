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

//! Wherobots type → Arrow type mapping.
//!
//! Maps Wherobots/SedonaDB SQL type names (from `DESCRIBE` results) to
//! Arrow `DataType`. The table is static and read-only; lookup is total —
//! an unrecognized name yields `None` and the caller decides the fallback.

use arrow_schema::{DataType, TimeUnit};

/// Map a Wherobots SQL type name to an Arrow DataType.
///
/// Matching is case-insensitive and ignores type parameters other than
/// decimal precision/scale, so `decimal(10,2)` and `VARCHAR(255)` both
/// resolve. Returns `None` for unrecognized names.
pub fn wherobots_type_to_arrow(type_name: &str) -> Option<DataType> {
    let type_upper = type_name.to_uppercase();
    let base_type = type_upper.split('(').next().unwrap_or(&type_upper).trim();

    match base_type {
        "BOOLEAN" | "BOOL" => Some(DataType::Boolean),
        "TINYINT" | "BYTE" => Some(DataType::Int8),
        "SMALLINT" | "SHORT" => Some(DataType::Int16),
        "INT" | "INTEGER" => Some(DataType::Int32),
        "BIGINT" | "LONG" => Some(DataType::Int64),
        "FLOAT" | "REAL" => Some(DataType::Float32),
        "DOUBLE" => Some(DataType::Float64),
        "DECIMAL" | "DEC" | "NUMERIC" => {
            let (precision, scale) = parse_decimal_params(type_name);
            Some(DataType::Decimal128(precision, scale))
        }
        "STRING" | "VARCHAR" | "CHAR" | "TEXT" => Some(DataType::Utf8),
        "BINARY" | "VARBINARY" => Some(DataType::Binary),
        "DATE" => Some(DataType::Date32),
        "TIMESTAMP" | "TIMESTAMP_NTZ" => Some(DataType::Timestamp(TimeUnit::Microsecond, None)),
        "TIMESTAMP_LTZ" => Some(DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into()))),
        // Spatial types are surfaced as WKT strings
        "GEOMETRY" | "GEOGRAPHY" => Some(DataType::Utf8),
        // Complex types are surfaced as JSON strings
        "ARRAY" | "MAP" | "STRUCT" => Some(DataType::Utf8),
        "VOID" | "NULL" => Some(DataType::Null),
        _ => None,
    }
}

/// Parse precision and scale from a DECIMAL(p,s) type string.
/// Defaults to DECIMAL(38,18) if not specified.
fn parse_decimal_params(type_name: &str) -> (u8, i8) {
    let default_precision = 38u8;
    let default_scale = 18i8;

    let Some(start) = type_name.find('(') else {
        return (default_precision, default_scale);
    };
    let Some(end) = type_name.find(')') else {
        return (default_precision, default_scale);
    };

    let params = &type_name[start + 1..end];
    let parts: Vec<&str> = params.split(',').map(|s| s.trim()).collect();

    let precision = parts
        .first()
        .and_then(|p| p.parse::<u8>().ok())
        .unwrap_or(default_precision);
    let scale = parts
        .get(1)
        .and_then(|s| s.parse::<i8>().ok())
        .unwrap_or(default_scale);

    (precision, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wherobots_type_to_arrow_primitives() {
        assert_eq!(wherobots_type_to_arrow("boolean"), Some(DataType::Boolean));
        assert_eq!(wherobots_type_to_arrow("tinyint"), Some(DataType::Int8));
        assert_eq!(wherobots_type_to_arrow("smallint"), Some(DataType::Int16));
        assert_eq!(wherobots_type_to_arrow("int"), Some(DataType::Int32));
        assert_eq!(wherobots_type_to_arrow("integer"), Some(DataType::Int32));
        assert_eq!(wherobots_type_to_arrow("bigint"), Some(DataType::Int64));
        assert_eq!(wherobots_type_to_arrow("float"), Some(DataType::Float32));
        assert_eq!(wherobots_type_to_arrow("double"), Some(DataType::Float64));
        assert_eq!(wherobots_type_to_arrow("string"), Some(DataType::Utf8));
        assert_eq!(wherobots_type_to_arrow("binary"), Some(DataType::Binary));
        assert_eq!(wherobots_type_to_arrow("date"), Some(DataType::Date32));
    }

    #[test]
    fn test_wherobots_type_to_arrow_timestamps() {
        assert_eq!(
            wherobots_type_to_arrow("timestamp"),
            Some(DataType::Timestamp(TimeUnit::Microsecond, None))
        );
        assert_eq!(
            wherobots_type_to_arrow("timestamp_ltz"),
            Some(DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())))
        );
    }

    #[test]
    fn test_wherobots_type_to_arrow_decimal() {
        assert_eq!(
            wherobots_type_to_arrow("decimal"),
            Some(DataType::Decimal128(38, 18))
        );
        assert_eq!(
            wherobots_type_to_arrow("decimal(10,2)"),
            Some(DataType::Decimal128(10, 2))
        );
        assert_eq!(
            wherobots_type_to_arrow("DECIMAL(38, 0)"),
            Some(DataType::Decimal128(38, 0))
        );
    }

    #[test]
    fn test_wherobots_type_to_arrow_spatial() {
        // Geometries come back as WKT strings
        assert_eq!(wherobots_type_to_arrow("geometry"), Some(DataType::Utf8));
        assert_eq!(wherobots_type_to_arrow("geography"), Some(DataType::Utf8));
    }

    #[test]
    fn test_wherobots_type_to_arrow_complex() {
        assert_eq!(wherobots_type_to_arrow("array"), Some(DataType::Utf8));
        assert_eq!(wherobots_type_to_arrow("map"), Some(DataType::Utf8));
        assert_eq!(wherobots_type_to_arrow("struct"), Some(DataType::Utf8));
    }

    #[test]
    fn test_wherobots_type_to_arrow_case_insensitive() {
        assert_eq!(wherobots_type_to_arrow("BOOLEAN"), Some(DataType::Boolean));
        assert_eq!(wherobots_type_to_arrow("Int"), Some(DataType::Int32));
        assert_eq!(wherobots_type_to_arrow("String"), Some(DataType::Utf8));
    }

    #[test]
    fn test_wherobots_type_to_arrow_unknown() {
        assert_eq!(wherobots_type_to_arrow("quaternion"), None);
        assert_eq!(wherobots_type_to_arrow(""), None);
    }

    #[test]
    fn test_parse_decimal_params() {
        assert_eq!(parse_decimal_params("decimal(10,2)"), (10, 2));
        assert_eq!(parse_decimal_params("decimal(38, 0)"), (38, 0));
        assert_eq!(parse_decimal_params("decimal"), (38, 18));
        assert_eq!(parse_decimal_params("numeric(5,3)"), (5, 3));
    }
}
