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

//! Error types for the Wherobots dialect adapter.
//!
//! The taxonomy follows the DB-API error vocabulary the host framework
//! expects: transport/session failures are [`Error::Interface`], remote
//! execution failures are [`Error::Operational`], and client misuse is
//! [`Error::Programming`]. A driver error whose message identifies a
//! missing table is reclassified as [`Error::NoSuchTable`]; every other
//! operational error propagates unchanged.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Failure to set up transport or acquire a SQL session.
    #[error("interface error: {0}")]
    Interface(String),

    /// Failure reported by the remote service while executing a statement.
    #[error("operational error: {0}")]
    Operational(String),

    /// Client-side misuse, e.g. fetching results before executing.
    #[error("programming error: {0}")]
    Programming(String),

    /// The referenced table does not exist.
    #[error("no such table: {0}")]
    NoSuchTable(String),

    /// The operation is not supported by the Wherobots SQL service.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// The `runtime` connection parameter is not a recognized runtime name.
    #[error("unknown runtime '{0}'")]
    UnknownRuntime(String),

    /// The `region` connection parameter is not a recognized region name.
    #[error("unknown region '{0}'")]
    UnknownRegion(String),
}

impl Error {
    pub fn interface(message: impl Into<String>) -> Self {
        Error::Interface(message.into())
    }

    pub fn operational(message: impl Into<String>) -> Self {
        Error::Operational(message.into())
    }

    pub fn programming(message: impl Into<String>) -> Self {
        Error::Programming(message.into())
    }

    pub fn not_supported(message: impl Into<String>) -> Self {
        Error::NotSupported(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoSuchTable("wherobots_open_data.foo.bar".to_string());
        assert_eq!(err.to_string(), "no such table: wherobots_open_data.foo.bar");

        let err = Error::UnknownRuntime("WARP_DRIVE".to_string());
        assert_eq!(err.to_string(), "unknown runtime 'WARP_DRIVE'");
    }

    #[test]
    fn test_error_helpers() {
        assert!(matches!(Error::interface("x"), Error::Interface(_)));
        assert!(matches!(Error::operational("x"), Error::Operational(_)));
        assert!(matches!(Error::programming("x"), Error::Programming(_)));
        assert!(matches!(Error::not_supported("x"), Error::NotSupported(_)));
    }
}
