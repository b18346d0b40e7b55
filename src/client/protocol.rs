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

//! Request and response types for the Wherobots SQL session REST API.

use serde::{Deserialize, Serialize};

/// Request body for creating a SQL session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Runtime instance identifier, e.g. `TINY` or `medium-himem`.
    pub runtime_id: String,
}

/// Lifecycle states of a SQL session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Pending,
    Requested,
    Deploying,
    Deployed,
    Initializing,
    Ready,
    Failed,
    Destroyed,
    #[serde(other)]
    Unknown,
}

impl SessionStatus {
    /// Whether the session is still being provisioned and worth polling again.
    pub fn is_starting(&self) -> bool {
        matches!(
            self,
            SessionStatus::Pending
                | SessionStatus::Requested
                | SessionStatus::Deploying
                | SessionStatus::Deployed
                | SessionStatus::Initializing
        )
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionStatus::Pending => "PENDING",
            SessionStatus::Requested => "REQUESTED",
            SessionStatus::Deploying => "DEPLOYING",
            SessionStatus::Deployed => "DEPLOYED",
            SessionStatus::Initializing => "INITIALIZING",
            SessionStatus::Ready => "READY",
            SessionStatus::Failed => "FAILED",
            SessionStatus::Destroyed => "DESTROYED",
            SessionStatus::Unknown => "UNKNOWN",
        };
        write!(f, "{s}")
    }
}

/// Application metadata attached to a ready session.
#[derive(Debug, Clone, Deserialize)]
pub struct AppMeta {
    /// Base URL of the session's SQL execution endpoint.
    pub url: String,
}

/// Response body describing a SQL session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub status: SessionStatus,
    #[serde(default)]
    pub app_meta: Option<AppMeta>,
}

/// Request body for submitting a SQL statement to a session.
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteRequest {
    pub statement: String,
}

/// Lifecycle states of a statement execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionState {
    Requested,
    Running,
    Succeeded,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl ExecutionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionState::Succeeded | ExecutionState::Failed | ExecutionState::Cancelled
        )
    }
}

impl std::fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExecutionState::Requested => "REQUESTED",
            ExecutionState::Running => "RUNNING",
            ExecutionState::Succeeded => "SUCCEEDED",
            ExecutionState::Failed => "FAILED",
            ExecutionState::Cancelled => "CANCELLED",
            ExecutionState::Unknown => "UNKNOWN",
        };
        write!(f, "{s}")
    }
}

/// Response body describing a statement execution.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResponse {
    pub execution_id: String,
    pub state: ExecutionState,
    /// Error message reported by the SQL engine for failed executions.
    #[serde(default)]
    pub error: Option<String>,
}

/// JSON-format results of a completed execution.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsResponse {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<serde_json::Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_status_is_starting() {
        assert!(SessionStatus::Requested.is_starting());
        assert!(SessionStatus::Deploying.is_starting());
        assert!(SessionStatus::Initializing.is_starting());
        assert!(!SessionStatus::Ready.is_starting());
        assert!(!SessionStatus::Failed.is_starting());
        assert!(!SessionStatus::Destroyed.is_starting());
    }

    #[test]
    fn test_session_response_deserialize() {
        let json = r#"{
            "id": "sess-1234",
            "status": "READY",
            "appMeta": {"url": "https://sql.example.com/sess-1234"}
        }"#;
        let resp: SessionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.id, "sess-1234");
        assert_eq!(resp.status, SessionStatus::Ready);
        assert_eq!(
            resp.app_meta.unwrap().url,
            "https://sql.example.com/sess-1234"
        );
    }

    #[test]
    fn test_unrecognized_status_maps_to_unknown() {
        let json = r#"{"id": "s", "status": "SOMETHING_NEW"}"#;
        let resp: SessionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, SessionStatus::Unknown);
        assert!(resp.app_meta.is_none());
    }

    #[test]
    fn test_execution_state_terminal() {
        assert!(ExecutionState::Succeeded.is_terminal());
        assert!(ExecutionState::Failed.is_terminal());
        assert!(ExecutionState::Cancelled.is_terminal());
        assert!(!ExecutionState::Running.is_terminal());
        assert!(!ExecutionState::Requested.is_terminal());
    }

    #[test]
    fn test_create_session_request_serialize() {
        let req = CreateSessionRequest {
            runtime_id: "TINY".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"runtimeId":"TINY"}"#);
    }

    #[test]
    fn test_results_response_defaults() {
        let resp: ResultsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.columns.is_empty());
        assert!(resp.rows.is_empty());
    }
}
