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

//! Wherobots implementation of the [`Dialect`] trait.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::connection::Connection;
use crate::cursor::Cursor;
use crate::dialect::Dialect;
use crate::driver::ConnectArgs;
use crate::error::{Error, Result};
use crate::metadata::parse::{cell_text, is_missing_table_error, is_missing_table_row};
use crate::metadata::{columns_from_describe, sql, ColumnDescriptor};

/// Connection URL parameter naming the session runtime.
const RUNTIME_PARAM: &str = "runtime";
/// Connection URL parameter naming the session region.
const REGION_PARAM: &str = "region";

const DEFAULT_RUNTIME_NAME: &str = "SEDONA";
const DEFAULT_REGION_NAME: &str = "AWS_US_WEST_2";

/// Dialect for the Wherobots spatial SQL service.
///
/// Introspection is built on `SHOW` and `DESCRIBE` statements against the
/// `wherobots_open_data` catalog; the service exposes no information
/// schema. Transactions are accepted and ignored, as the backing tables
/// are read-only.
#[derive(Debug, Clone, Default)]
pub struct WherobotsDialect;

impl WherobotsDialect {
    pub fn new() -> Self {
        WherobotsDialect
    }

    /// Runs `DESCRIBE` on the table and returns the raw result rows,
    /// classifying both ways the service reports a missing table as
    /// [`Error::NoSuchTable`].
    fn describe_rows(
        &self,
        conn: &Connection,
        table_name: &str,
        schema: Option<&str>,
    ) -> Result<Vec<Vec<Value>>> {
        let full_table = sql::qualified_table(table_name, schema);
        let result = match conn.execute(&sql::describe_table(table_name, schema)) {
            Ok(result) => result,
            Err(Error::Operational(message))
                if is_missing_table_error(&message, &full_table) =>
            {
                return Err(Error::NoSuchTable(full_table));
            }
            Err(e) => return Err(e),
        };

        // Some engine versions answer a DESCRIBE of a missing table with a
        // single "Table ... does not exist" row instead of an error.
        if result.rows.len() == 1 {
            if let Some(first_cell) = result.rows[0].first() {
                if is_missing_table_row(&cell_text(first_cell)) {
                    return Err(Error::NoSuchTable(full_table));
                }
            }
        }

        Ok(result.rows)
    }
}

impl Dialect for WherobotsDialect {
    fn name(&self) -> &str {
        "wherobots"
    }

    /// Derives connection parameters from a URL of the form
    /// `wherobots://<api-key>@host?runtime=SEDONA&region=AWS_US_WEST_2`.
    ///
    /// The username carries the API key and is passed through as-is; a
    /// missing credential is reported when the connection is opened.
    /// `runtime` and `region` are optional and fall back to the smallest
    /// runtime and the default region. Unrecognized runtime or region
    /// names are an error.
    fn create_connect_args(&self, url: &Url) -> Result<ConnectArgs> {
        let mut runtime_name = DEFAULT_RUNTIME_NAME.to_string();
        let mut region_name = DEFAULT_REGION_NAME.to_string();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                RUNTIME_PARAM => runtime_name = value.into_owned(),
                REGION_PARAM => region_name = value.into_owned(),
                _ => {}
            }
        }

        Ok(ConnectArgs {
            api_key: url.username().to_string(),
            runtime: runtime_name.parse()?,
            region: region_name.parse()?,
        })
    }

    fn get_schema_names(&self, conn: &Connection) -> Result<Vec<String>> {
        let result = conn.execute(&sql::show_schemas())?;
        debug!("Found {} schemas", result.rows.len());
        Ok(result
            .rows
            .iter()
            .filter_map(|row| row.first())
            .map(cell_text)
            .collect())
    }

    fn get_table_names(&self, conn: &Connection, schema: Option<&str>) -> Result<Vec<String>> {
        let result = conn.execute(&sql::show_tables(schema))?;
        debug!("Found {} tables in {:?}", result.rows.len(), schema);
        // SHOW TABLES yields (namespace, tableName, isTemporary); the
        // table name is the second column.
        Ok(result
            .rows
            .iter()
            .filter_map(|row| row.get(1))
            .map(cell_text)
            .collect())
    }

    fn has_table(
        &self,
        conn: &Connection,
        table_name: &str,
        schema: Option<&str>,
    ) -> Result<bool> {
        match self.describe_rows(conn, table_name, schema) {
            Ok(_) => Ok(true),
            Err(Error::NoSuchTable(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn get_columns(
        &self,
        conn: &Connection,
        table_name: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ColumnDescriptor>> {
        let rows = self.describe_rows(conn, table_name, schema)?;
        columns_from_describe(&rows)
    }

    /// Forwards the statement to the cursor, then reads the buffered
    /// rows so the statement's full cost is paid here rather than lazily
    /// at fetch time. The read does not advance the cursor, so the host
    /// can still fetch the complete result set afterwards.
    fn do_execute(
        &self,
        cursor: &mut Cursor<'_>,
        statement: &str,
        parameters: Option<&HashMap<String, Value>>,
    ) -> Result<()> {
        cursor.execute(statement, parameters)?;
        cursor.fetchall()?;
        Ok(())
    }

    fn do_commit(&self, _conn: &Connection) -> Result<()> {
        Ok(())
    }

    fn do_rollback(&self, _conn: &Connection) -> Result<()> {
        Ok(())
    }

    fn do_rollback_to_savepoint(&self, _conn: &Connection, _name: &str) -> Result<()> {
        Ok(())
    }
}
