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

//! SQL statement builders for metadata queries.
//!
//! Builds the `SHOW SCHEMAS`, `SHOW TABLES`, and `DESCRIBE` statements the
//! dialect issues against the Wherobots open-data catalog. Kept separate
//! from the dialect so the exact statement text has its own unit tests.

/// The catalog every introspection query is scoped to.
pub const OPEN_DATA_CATALOG: &str = "wherobots_open_data";

/// Build the `SHOW SCHEMAS` statement.
pub fn show_schemas() -> String {
    format!("SHOW SCHEMAS IN {}", OPEN_DATA_CATALOG)
}

/// Build the `SHOW TABLES` statement, optionally scoped to a schema in the
/// open-data catalog.
pub fn show_tables(schema: Option<&str>) -> String {
    match schema {
        Some(schema) => format!("SHOW TABLES IN {}.{}", OPEN_DATA_CATALOG, schema),
        None => "SHOW TABLES".to_string(),
    }
}

/// Build the fully qualified table reference: catalog-qualified when a
/// schema is given, the bare table name otherwise.
pub fn qualified_table(table_name: &str, schema: Option<&str>) -> String {
    match schema {
        Some(schema) => format!("{}.{}.{}", OPEN_DATA_CATALOG, schema, table_name),
        None => table_name.to_string(),
    }
}

/// Build the `DESCRIBE` statement for a table.
pub fn describe_table(table_name: &str, schema: Option<&str>) -> String {
    format!("DESCRIBE {}", qualified_table(table_name, schema))
}

/// Quote an identifier by wrapping it in backticks.
///
/// Any backticks within the identifier are doubled.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
