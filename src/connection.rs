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

//! Synchronous connection facade over the async Wherobots client.
//!
//! A [`Connection`] owns a dedicated Tokio runtime and blocks on each
//! client call, presenting the blocking interface the dialect layer and
//! its host framework expect.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::{QueryResult, WherobotsClient};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::region::Region;
use crate::runtime::Runtime;

/// A live connection to a Wherobots SQL session.
pub struct Connection {
    client: Arc<dyn WherobotsClient>,
    session_id: String,
    runtime: tokio::runtime::Runtime,
}

impl Connection {
    /// Provisions a SQL session and wraps it in a blocking connection.
    pub fn new(
        client: Arc<dyn WherobotsClient>,
        runtime: Runtime,
        region: Region,
    ) -> Result<Self> {
        let tokio_runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| Error::interface(format!("Failed to start async runtime: {e}")))?;

        let session = tokio_runtime
            .block_on(client.create_session(runtime, region))
            .map_err(|e| Error::interface(format!("Could not acquire SQL session: {e}")))?;
        debug!("Acquired SQL session {}", session.session_id);

        Ok(Self {
            client,
            session_id: session.session_id,
            runtime: tokio_runtime,
        })
    }

    /// The service-assigned identifier of the underlying SQL session.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Executes a statement and waits for its complete result set.
    pub fn execute(&self, statement: &str) -> Result<QueryResult> {
        debug!("Executing statement: {}", statement);
        self.runtime
            .block_on(self.client.execute_statement(&self.session_id, statement))
    }

    /// Cancels an in-flight statement execution on this session.
    pub fn cancel_execution(&self, execution_id: &str) -> Result<()> {
        debug!("Cancelling execution {}", execution_id);
        self.runtime
            .block_on(self.client.cancel_execution(&self.session_id, execution_id))
    }

    /// Opens a cursor over this connection.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(self)
    }

    /// Transactions are not supported by the Wherobots SQL service.
    pub fn commit(&self) -> Result<()> {
        Err(Error::not_supported(
            "Transactions are not supported by the Wherobots SQL service",
        ))
    }

    /// Transactions are not supported by the Wherobots SQL service.
    pub fn rollback(&self) -> Result<()> {
        Err(Error::not_supported(
            "Transactions are not supported by the Wherobots SQL service",
        ))
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        let result = self
            .runtime
            .block_on(self.client.delete_session(&self.session_id));
        if let Err(e) = result {
            warn!("Failed to release SQL session {}: {}", self.session_id, e);
        }
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}
