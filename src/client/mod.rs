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

//! Client abstraction for the Wherobots SQL service.
//!
//! [`WherobotsClient`] is the seam between the connection layer and the
//! wire protocol: production code uses [`rest::RestClient`], tests swap in
//! a mock that replays canned results.

pub mod http;
pub mod protocol;
pub mod rest;

use async_trait::async_trait;

use crate::error::Result;
use crate::region::Region;
use crate::runtime::Runtime;

/// Credentials used to authenticate against the Wherobots API.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Static API key, sent as `X-API-Key`.
    ApiKey(String),
    /// OAuth bearer token, sent as `Authorization: Bearer <token>`.
    BearerToken(String),
}

impl Credentials {
    /// Header name and value carrying these credentials.
    pub fn header(&self) -> (&'static str, String) {
        match self {
            Credentials::ApiKey(key) => ("X-API-Key", key.clone()),
            Credentials::BearerToken(token) => ("Authorization", format!("Bearer {token}")),
        }
    }
}

/// A provisioned SQL session.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    /// Service-assigned session identifier.
    pub session_id: String,
    /// Base URL of the session's statement execution endpoint.
    pub session_url: String,
}

/// Tabular result of a SQL statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Column names, in result order.
    pub columns: Vec<String>,
    /// Row-major cell values.
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<serde_json::Value>>) -> Self {
        QueryResult { columns, rows }
    }
}

/// Operations the connection layer needs from the Wherobots service.
#[async_trait]
pub trait WherobotsClient: Send + Sync {
    /// Provision a SQL session on the given runtime and wait until it is
    /// ready to accept statements.
    async fn create_session(&self, runtime: Runtime, region: Region) -> Result<SessionInfo>;

    /// Tear down a SQL session.
    async fn delete_session(&self, session_id: &str) -> Result<()>;

    /// Execute a statement on a session and wait for its full result set.
    async fn execute_statement(&self, session_id: &str, statement: &str) -> Result<QueryResult>;

    /// Cancel an in-flight statement execution.
    async fn cancel_execution(&self, session_id: &str, execution_id: &str) -> Result<()>;
}
