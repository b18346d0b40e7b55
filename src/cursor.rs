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

//! Cursor over a connection's query results.
//!
//! The cursor mirrors the DB-API shape the host framework drives:
//! `execute` runs a statement and buffers its full result set, and the
//! `fetch*` methods walk that buffer. Fetching before any statement has
//! been executed is a programming error.

use std::collections::HashMap;

use serde_json::Value;

use crate::client::QueryResult;
use crate::connection::Connection;
use crate::error::{Error, Result};

/// A cursor tied to a [`Connection`].
pub struct Cursor<'conn> {
    conn: &'conn Connection,
    result: Option<QueryResult>,
    pos: usize,
    /// Default batch size for [`Cursor::fetchmany`].
    pub arraysize: usize,
}

impl<'conn> Cursor<'conn> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            result: None,
            pos: 0,
            arraysize: 1,
        }
    }

    /// Executes a statement, substituting any named `{param}` markers from
    /// `parameters`, and buffers the complete result set.
    pub fn execute(
        &mut self,
        operation: &str,
        parameters: Option<&HashMap<String, Value>>,
    ) -> Result<()> {
        let statement = match parameters {
            Some(params) => bind_named(operation, params),
            None => operation.to_string(),
        };
        self.result = Some(self.conn.execute(&statement)?);
        self.pos = 0;
        Ok(())
    }

    /// Column names of the current result set, in result order.
    pub fn description(&self) -> Option<&[String]> {
        self.result.as_ref().map(|r| r.columns.as_slice())
    }

    /// Number of rows in the current result set, or -1 before any
    /// statement has been executed.
    pub fn rowcount(&self) -> i64 {
        match &self.result {
            Some(result) => result.rows.len() as i64,
            None => -1,
        }
    }

    /// Fetches the next row, or `None` when the result set is exhausted.
    pub fn fetchone(&mut self) -> Result<Option<Vec<Value>>> {
        let result = self.current_result()?;
        match result.rows.get(self.pos) {
            Some(row) => {
                let row = row.clone();
                self.pos += 1;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    /// Fetches the next batch of rows, `size` defaulting to `arraysize`.
    pub fn fetchmany(&mut self, size: Option<usize>) -> Result<Vec<Vec<Value>>> {
        let size = size.unwrap_or(self.arraysize);
        let result = self.current_result()?;
        let end = (self.pos + size).min(result.rows.len());
        let rows = result.rows[self.pos..end].to_vec();
        self.pos = end;
        Ok(rows)
    }

    /// Returns all remaining rows without advancing the cursor position,
    /// so the rows stay readable by later fetches.
    pub fn fetchall(&self) -> Result<Vec<Vec<Value>>> {
        let result = self.current_result()?;
        Ok(result.rows[self.pos.min(result.rows.len())..].to_vec())
    }

    fn current_result(&self) -> Result<&QueryResult> {
        self.result
            .as_ref()
            .ok_or_else(|| Error::programming("No query has been executed yet"))
    }
}

/// Substitutes `{name}` markers with the corresponding parameter values.
///
/// String values are inserted as-is; other values use their JSON
/// rendering. Markers with no matching parameter are left untouched.
fn bind_named(operation: &str, parameters: &HashMap<String, Value>) -> String {
    let mut statement = operation.to_string();
    for (name, value) in parameters {
        let marker = format!("{{{name}}}");
        let rendered = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        statement = statement.replace(&marker, &rendered);
    }
    statement
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bind_named_strings_and_numbers() {
        let mut params = HashMap::new();
        params.insert("name".to_string(), json!("paris"));
        params.insert("limit".to_string(), json!(10));
        let statement = bind_named(
            "SELECT * FROM cities WHERE name = '{name}' LIMIT {limit}",
            &params,
        );
        assert_eq!(
            statement,
            "SELECT * FROM cities WHERE name = 'paris' LIMIT 10"
        );
    }

    #[test]
    fn test_bind_named_leaves_unknown_markers() {
        let params = HashMap::new();
        let statement = bind_named("SELECT {missing}", &params);
        assert_eq!(statement, "SELECT {missing}");
    }

    #[test]
    fn test_bind_named_non_string_values() {
        let mut params = HashMap::new();
        params.insert("flag".to_string(), json!(true));
        params.insert("score".to_string(), json!(1.5));
        let statement = bind_named("VALUES ({flag}, {score})", &params);
        assert_eq!(statement, "VALUES (true, 1.5)");
    }
}
