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

//! REST client for the Wherobots SQL session API.
//!
//! Session lifecycle and statement execution both follow a
//! submit-then-poll pattern: a POST creates the resource, GETs poll it
//! until a terminal state, and a final GET retrieves the results. The
//! poll loops are generic over the status source so their outcome rules
//! can be tested without a live endpoint.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::client::http::WherobotsHttpClient;
use crate::client::protocol::{
    CreateSessionRequest, ExecuteRequest, ExecutionResponse, ExecutionState, ResultsResponse,
    SessionResponse, SessionStatus,
};
use crate::client::{QueryResult, SessionInfo, WherobotsClient};
use crate::error::{Error, Result};
use crate::region::Region;
use crate::runtime::Runtime;

/// How long to wait for a SQL session to become ready.
const SESSION_WAIT_TIMEOUT: Duration = Duration::from_secs(900);

/// Initial and maximum delay between session status polls.
const SESSION_POLL_INITIAL: Duration = Duration::from_secs(1);
const SESSION_POLL_MAX: Duration = Duration::from_secs(5);

/// How long to wait for a statement execution to finish.
const EXECUTION_WAIT_TIMEOUT: Duration = Duration::from_secs(600);

/// Delay between execution status polls.
const EXECUTION_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Client for the Wherobots SQL session REST API.
pub struct RestClient {
    http: WherobotsHttpClient,
    host: String,
    /// Session id to execution endpoint URL, populated when a session
    /// reaches the ready state.
    session_urls: DashMap<String, String>,
}

impl RestClient {
    /// Creates a REST client talking to the given API host.
    ///
    /// The host may be a bare hostname like `api.wherobots.services`; a
    /// missing scheme defaults to `https`.
    pub fn new(http: WherobotsHttpClient, host: &str) -> Self {
        Self {
            http,
            host: normalize_host(host),
            session_urls: DashMap::new(),
        }
    }

    async fn get_session(&self, session_id: &str) -> Result<SessionResponse> {
        let url = format!("{}/sql/session/{session_id}", self.host);
        let request = self
            .http
            .inner()
            .get(&url)
            .build()
            .map_err(|e| Error::interface(format!("Failed to build request: {e}")))?;
        let response = self.http.execute(request).await?;
        response
            .json::<SessionResponse>()
            .await
            .map_err(|e| Error::interface(format!("Invalid session response: {e}")))
    }

    fn session_url(&self, session_id: &str) -> Result<String> {
        self.session_urls
            .get(session_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::programming(format!("Unknown SQL session: {session_id}")))
    }

    async fn get_execution(
        &self,
        session_url: &str,
        execution_id: &str,
    ) -> Result<ExecutionResponse> {
        let url = format!("{session_url}/executions/{execution_id}");
        let request = self
            .http
            .inner()
            .get(&url)
            .build()
            .map_err(|e| Error::interface(format!("Failed to build request: {e}")))?;
        let response = self.http.execute(request).await?;
        response
            .json::<ExecutionResponse>()
            .await
            .map_err(|e| Error::interface(format!("Invalid execution response: {e}")))
    }

    async fn fetch_results(&self, session_url: &str, execution_id: &str) -> Result<QueryResult> {
        let url = format!("{session_url}/executions/{execution_id}/results?format=json");
        let request = self
            .http
            .inner()
            .get(&url)
            .build()
            .map_err(|e| Error::interface(format!("Failed to build request: {e}")))?;
        let response = self.http.execute(request).await?;
        let results = response
            .json::<ResultsResponse>()
            .await
            .map_err(|e| Error::interface(format!("Invalid results response: {e}")))?;
        Ok(QueryResult::new(results.columns, results.rows))
    }
}

#[async_trait]
impl WherobotsClient for RestClient {
    async fn create_session(&self, runtime: Runtime, region: Region) -> Result<SessionInfo> {
        let url = format!("{}/sql/session?region={}", self.host, region.value());
        let body = CreateSessionRequest {
            runtime_id: runtime.runtime_id().to_string(),
        };

        info!("Requesting {} SQL session in {}", runtime, region.value());
        let request = self
            .http
            .inner()
            .post(&url)
            .json(&body)
            .build()
            .map_err(|e| Error::interface(format!("Failed to build request: {e}")))?;
        let response = self.http.execute(request).await?;
        let session = response
            .json::<SessionResponse>()
            .await
            .map_err(|e| Error::interface(format!("Invalid session response: {e}")))?;

        let session_id = session.id.clone();
        let session_url =
            poll_session(|| self.get_session(&session_id), SESSION_WAIT_TIMEOUT).await?;
        self.session_urls
            .insert(session_id.clone(), session_url.clone());

        Ok(SessionInfo {
            session_id,
            session_url,
        })
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.session_urls.remove(session_id);

        let url = format!("{}/sql/session/{session_id}", self.host);
        let request = self
            .http
            .inner()
            .delete(&url)
            .build()
            .map_err(|e| Error::interface(format!("Failed to build request: {e}")))?;
        match self.http.execute(request).await {
            Ok(_) => {
                debug!("Deleted SQL session {}", session_id);
                Ok(())
            }
            Err(e) => {
                // Session teardown is best-effort; the service reaps idle
                // sessions on its own.
                warn!("Failed to delete SQL session {}: {}", session_id, e);
                Ok(())
            }
        }
    }

    async fn execute_statement(&self, session_id: &str, statement: &str) -> Result<QueryResult> {
        let session_url = self.session_url(session_id)?;

        let url = format!("{session_url}/executions");
        let body = ExecuteRequest {
            statement: statement.to_string(),
        };
        let request = self
            .http
            .inner()
            .post(&url)
            .json(&body)
            .build()
            .map_err(|e| Error::interface(format!("Failed to build request: {e}")))?;
        let response = self.http.execute(request).await?;
        let execution = response
            .json::<ExecutionResponse>()
            .await
            .map_err(|e| Error::interface(format!("Invalid execution response: {e}")))?;

        let execution_id = execution.execution_id.clone();
        debug!(
            "Submitted execution {} on session {}",
            execution_id, session_id
        );
        let execution = poll_execution(
            || self.get_execution(&session_url, &execution_id),
            EXECUTION_WAIT_TIMEOUT,
        )
        .await?;

        self.fetch_results(&session_url, &execution.execution_id)
            .await
    }

    async fn cancel_execution(&self, session_id: &str, execution_id: &str) -> Result<()> {
        let session_url = self.session_url(session_id)?;
        let url = format!("{session_url}/executions/{execution_id}");
        let request = self
            .http
            .inner()
            .delete(&url)
            .build()
            .map_err(|e| Error::interface(format!("Failed to build request: {e}")))?;
        self.http.execute(request).await?;
        debug!(
            "Cancelled execution {} on session {}",
            execution_id, session_id
        );
        Ok(())
    }
}

/// Polls a session until it is ready, returning its execution endpoint.
///
/// Starting statuses poll again with backoff until the timeout; any other
/// non-ready status fails the session outright.
async fn poll_session<F, Fut>(mut fetch: F, timeout: Duration) -> Result<String>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<SessionResponse>>,
{
    let deadline = Instant::now() + timeout;
    let mut delay = SESSION_POLL_INITIAL;

    loop {
        let session = fetch().await?;
        match session.status {
            SessionStatus::Ready => {
                let app_meta = session.app_meta.ok_or_else(|| {
                    Error::interface("Session is ready but has no application URL")
                })?;
                debug!("Session {} ready at {}", session.id, app_meta.url);
                return Ok(app_meta.url);
            }
            status if status.is_starting() => {
                if Instant::now() >= deadline {
                    return Err(Error::interface(format!(
                        "Timed out waiting for SQL session {} to become ready",
                        session.id
                    )));
                }
                debug!("Session {} is {}, waiting...", session.id, status);
                sleep(delay).await;
                delay = (delay * 2).min(SESSION_POLL_MAX);
            }
            status => {
                return Err(Error::operational(format!(
                    "Failed to create SQL session: {status}"
                )));
            }
        }
    }
}

/// Polls an execution until it succeeds.
///
/// A failed execution surfaces the engine's error message unchanged; any
/// other terminal state is reported as unexpected.
async fn poll_execution<F, Fut>(mut fetch: F, timeout: Duration) -> Result<ExecutionResponse>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<ExecutionResponse>>,
{
    let deadline = Instant::now() + timeout;

    loop {
        let execution = fetch().await?;
        match execution.state {
            ExecutionState::Succeeded => return Ok(execution),
            ExecutionState::Failed => {
                return Err(Error::Operational(
                    execution
                        .error
                        .unwrap_or_else(|| "Query execution failed".to_string()),
                ));
            }
            state if state.is_terminal() => {
                return Err(Error::operational(format!(
                    "Query execution ended in unexpected state {state}"
                )));
            }
            _ => {
                if Instant::now() >= deadline {
                    return Err(Error::operational(format!(
                        "Timed out waiting for execution {}",
                        execution.execution_id
                    )));
                }
                sleep(EXECUTION_POLL_INTERVAL).await;
            }
        }
    }
}

/// Prepends `https://` when the host carries no scheme and strips any
/// trailing slash.
fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::protocol::AppMeta;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn session(status: SessionStatus, url: Option<&str>) -> SessionResponse {
        SessionResponse {
            id: "sess-1".to_string(),
            status,
            app_meta: url.map(|u| AppMeta { url: u.to_string() }),
        }
    }

    fn execution(state: ExecutionState, error: Option<&str>) -> ExecutionResponse {
        ExecutionResponse {
            execution_id: "exec-1".to_string(),
            state,
            error: error.map(|e| e.to_string()),
        }
    }

    #[test]
    fn test_normalize_host() {
        assert_eq!(
            normalize_host("api.wherobots.services"),
            "https://api.wherobots.services"
        );
        assert_eq!(
            normalize_host("https://api.wherobots.services/"),
            "https://api.wherobots.services"
        );
        assert_eq!(
            normalize_host("http://localhost:8080"),
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_unknown_session_is_programming_error() {
        let http = WherobotsHttpClient::new(
            Default::default(),
            crate::client::Credentials::ApiKey("k".to_string()),
        )
        .unwrap();
        let client = RestClient::new(http, "api.wherobots.services");
        let err = client.session_url("missing").unwrap_err();
        assert!(matches!(err, Error::Programming(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_session_ready_returns_app_url() {
        let url = poll_session(
            || async { Ok(session(SessionStatus::Ready, Some("https://sql.test/s1"))) },
            SESSION_WAIT_TIMEOUT,
        )
        .await
        .unwrap();
        assert_eq!(url, "https://sql.test/s1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_session_waits_through_starting_statuses() {
        let responses = Mutex::new(VecDeque::from([
            session(SessionStatus::Requested, None),
            session(SessionStatus::Deploying, None),
            session(SessionStatus::Initializing, None),
            session(SessionStatus::Ready, Some("https://sql.test/s1")),
        ]));
        let url = poll_session(
            || {
                let next = responses.lock().unwrap().pop_front().unwrap();
                async move { Ok(next) }
            },
            SESSION_WAIT_TIMEOUT,
        )
        .await
        .unwrap();
        assert_eq!(url, "https://sql.test/s1");
        assert!(responses.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_session_terminal_status_fails() {
        let err = poll_session(
            || async { Ok(session(SessionStatus::Failed, None)) },
            SESSION_WAIT_TIMEOUT,
        )
        .await
        .unwrap_err();
        assert!(
            matches!(err, Error::Operational(ref m) if m == "Failed to create SQL session: FAILED")
        );

        let err = poll_session(
            || async { Ok(session(SessionStatus::Destroyed, None)) },
            SESSION_WAIT_TIMEOUT,
        )
        .await
        .unwrap_err();
        assert!(
            matches!(err, Error::Operational(ref m) if m == "Failed to create SQL session: DESTROYED")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_session_ready_without_url_fails() {
        let err = poll_session(
            || async { Ok(session(SessionStatus::Ready, None)) },
            SESSION_WAIT_TIMEOUT,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Interface(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_session_times_out() {
        let err = poll_session(
            || async { Ok(session(SessionStatus::Requested, None)) },
            Duration::from_secs(10),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Interface(ref m) if m.contains("Timed out")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_execution_succeeded_passes_through() {
        let execution = poll_execution(
            || async { Ok(execution(ExecutionState::Succeeded, None)) },
            EXECUTION_WAIT_TIMEOUT,
        )
        .await
        .unwrap();
        assert_eq!(execution.execution_id, "exec-1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_execution_failure_keeps_engine_message() {
        let err = poll_execution(
            || async {
                Ok(execution(
                    ExecutionState::Failed,
                    Some("AnalysisException: cannot resolve 'nope'"),
                ))
            },
            EXECUTION_WAIT_TIMEOUT,
        )
        .await
        .unwrap_err();
        assert!(
            matches!(err, Error::Operational(ref m) if m == "AnalysisException: cannot resolve 'nope'")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_execution_cancelled_is_unexpected() {
        let err = poll_execution(
            || async { Ok(execution(ExecutionState::Cancelled, None)) },
            EXECUTION_WAIT_TIMEOUT,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Operational(ref m) if m.contains("CANCELLED")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_execution_times_out() {
        let err = poll_execution(
            || async { Ok(execution(ExecutionState::Running, None)) },
            Duration::from_secs(2),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Operational(ref m) if m.contains("Timed out")));
    }
}
