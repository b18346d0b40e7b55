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

//! Connection entry points for the Wherobots SQL service.

use std::sync::Arc;

use crate::client::http::{HttpClientConfig, WherobotsHttpClient};
use crate::client::rest::RestClient;
use crate::client::{Credentials, WherobotsClient};
use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::logging::{init_logging, LogConfig};
use crate::region::Region;
use crate::runtime::Runtime;

/// Production Wherobots API endpoint.
pub const DEFAULT_ENDPOINT: &str = "api.wherobots.services";
/// Staging Wherobots API endpoint.
pub const STAGING_ENDPOINT: &str = "api.staging.wherobots.services";

/// Parameters for opening a connection, usually derived from a
/// connection URL by the dialect layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectArgs {
    /// Wherobots API key.
    pub api_key: String,
    /// Runtime to provision the SQL session on.
    pub runtime: Runtime,
    /// Region to provision the SQL session in.
    pub region: Region,
}

impl ConnectArgs {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            runtime: Runtime::default(),
            region: Region::default(),
        }
    }
}

/// Opens a connection against the production Wherobots endpoint.
pub fn connect(args: &ConnectArgs) -> Result<Connection> {
    connect_to_host(DEFAULT_ENDPOINT, args)
}

/// Opens a connection against a specific API host.
pub fn connect_to_host(host: &str, args: &ConnectArgs) -> Result<Connection> {
    init_logging(&LogConfig::default());

    if args.api_key.is_empty() {
        return Err(Error::interface("Missing API key for authentication"));
    }

    let http = WherobotsHttpClient::new(
        HttpClientConfig::default(),
        Credentials::ApiKey(args.api_key.clone()),
    )?;
    let client = Arc::new(RestClient::new(http, host));
    Connection::new(client, args.runtime, args.region)
}

/// Opens a connection over an already-constructed client.
///
/// Used by tests to substitute a mock for the REST client.
pub fn connect_with_client(
    client: Arc<dyn WherobotsClient>,
    args: &ConnectArgs,
) -> Result<Connection> {
    Connection::new(client, args.runtime, args.region)
}
