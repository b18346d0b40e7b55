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

//! SQL dialect adapter for the Wherobots spatial analytics service.
//!
//! This crate connects a generic database host framework to Wherobots
//! Cloud: it provisions SQL sessions over the Wherobots REST API, runs
//! statements on them, and answers the host's introspection calls
//! (schemas, tables, columns) by scraping `SHOW` and `DESCRIBE` output
//! from the `wherobots_open_data` catalog.
//!
//! # Connection URLs
//!
//! Connection parameters are derived from a URL of the form
//! `wherobots://<api-key>@<host>?runtime=...&region=...`:
//!
//! | Part      | Meaning                          | Default         |
//! |-----------|----------------------------------|-----------------|
//! | username  | Wherobots API key (required)     | —               |
//! | `runtime` | SQL session runtime size         | `SEDONA`        |
//! | `region`  | Region to provision the session  | `AWS_US_WEST_2` |
//!
//! Unrecognized runtime or region names fail URL parsing instead of
//! being passed through to the service.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use wherobots_dialect::{connect, dialect, ConnectArgs, WherobotsDialect};
//!
//! # fn main() -> wherobots_dialect::Result<()> {
//! // Dialect registration is an explicit call, not an import side effect.
//! dialect::register(Arc::new(WherobotsDialect::new()));
//!
//! let conn = connect(&ConnectArgs::new("my-api-key"))?;
//! let mut cursor = conn.cursor();
//! cursor.execute("SELECT name FROM wherobots_open_data.overture.places LIMIT 10", None)?;
//! for row in cursor.fetchall()? {
//!     println!("{row:?}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! The first `connect()` call initializes a `tracing` subscriber;
//! verbosity is controlled with `RUST_LOG=wherobots_dialect=debug`.

pub mod client;
pub mod connection;
pub mod cursor;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod region;
pub mod runtime;

pub use client::{QueryResult, WherobotsClient};
pub use connection::Connection;
pub use cursor::Cursor;
pub use dialect::{Dialect, WherobotsDialect};
pub use driver::{
    connect, connect_to_host, connect_with_client, ConnectArgs, DEFAULT_ENDPOINT, STAGING_ENDPOINT,
};
pub use error::{Error, Result};
pub use logging::LogConfig;
pub use metadata::ColumnDescriptor;
pub use region::Region;
pub use runtime::Runtime;
