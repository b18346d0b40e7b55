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

//! Dialect abstraction and registry.
//!
//! A [`Dialect`] adapts a SQL backend to the generic operations a host
//! framework drives: deriving connection parameters from a URL, schema
//! and table introspection, statement execution, and transaction hooks.
//!
//! Dialects are made available to hosts through an explicit call to
//! [`register`]; nothing is registered as an import side effect.

pub mod wherobots;

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use serde_json::Value;
use url::Url;

use crate::connection::Connection;
use crate::cursor::Cursor;
use crate::driver::ConnectArgs;
use crate::error::Result;
use crate::metadata::{sql, ColumnDescriptor};

pub use wherobots::WherobotsDialect;

/// Backend-specific behavior driven by a host framework.
pub trait Dialect: Send + Sync {
    /// Name this dialect registers under, e.g. `"wherobots"`.
    fn name(&self) -> &str;

    /// Derives connection parameters from a connection URL.
    fn create_connect_args(&self, url: &Url) -> Result<ConnectArgs>;

    /// Lists schema names visible to the connection.
    fn get_schema_names(&self, conn: &Connection) -> Result<Vec<String>>;

    /// Lists table names, scoped to `schema` when given.
    fn get_table_names(&self, conn: &Connection, schema: Option<&str>) -> Result<Vec<String>>;

    /// Whether the given table exists.
    fn has_table(&self, conn: &Connection, table_name: &str, schema: Option<&str>)
        -> Result<bool>;

    /// Describes the columns of the given table.
    fn get_columns(
        &self,
        conn: &Connection,
        table_name: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ColumnDescriptor>>;

    /// Executes a statement through the cursor and drains its results.
    fn do_execute(
        &self,
        cursor: &mut Cursor<'_>,
        statement: &str,
        parameters: Option<&HashMap<String, Value>>,
    ) -> Result<()>;

    /// Commit hook. Backends without transactions treat this as a no-op.
    fn do_commit(&self, conn: &Connection) -> Result<()>;

    /// Rollback hook. Backends without transactions treat this as a no-op.
    fn do_rollback(&self, conn: &Connection) -> Result<()>;

    /// Savepoint rollback hook.
    fn do_rollback_to_savepoint(&self, conn: &Connection, name: &str) -> Result<()>;

    /// Parameter marker style understood by [`Cursor::execute`].
    fn paramstyle(&self) -> &str {
        "named"
    }

    /// Quotes an identifier for safe interpolation into SQL text.
    fn quote_identifier(&self, name: &str) -> String {
        sql::quote_identifier(name)
    }
}

static REGISTRY: OnceLock<DashMap<String, Arc<dyn Dialect>>> = OnceLock::new();

fn registry() -> &'static DashMap<String, Arc<dyn Dialect>> {
    REGISTRY.get_or_init(DashMap::new)
}

/// Registers a dialect under its name, replacing any previous
/// registration.
pub fn register(dialect: Arc<dyn Dialect>) {
    registry().insert(dialect.name().to_string(), dialect);
}

/// Looks up a previously registered dialect.
pub fn lookup(name: &str) -> Option<Arc<dyn Dialect>> {
    registry().get(name).map(|entry| entry.value().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_round_trip() {
        register(Arc::new(WherobotsDialect::new()));
        let dialect = lookup("wherobots").unwrap();
        assert_eq!(dialect.name(), "wherobots");
        assert_eq!(dialect.paramstyle(), "named");
    }

    #[test]
    fn test_lookup_unregistered() {
        assert!(lookup("no-such-dialect").is_none());
    }
}
