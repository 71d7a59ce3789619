//! Storefront MCP client.
//!
//! [`ShopifyClient::call`] never fails: transport errors, non-2xx answers and
//! API-reported errors are all folded into [`UpstreamResult::Failure`].

use super::models::{api_message, NormalizedError, UpstreamBody, UpstreamEnvelope, UpstreamResult};
use super::session::{SessionSnapshot, SessionStats, UpstreamSession};
use reqwest::{header::CONTENT_TYPE, StatusCode};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, error, warn, Instrument};

/// Client for the storefront's JSON-RPC tool endpoint.
#[derive(Debug)]
pub struct ShopifyClient {
    endpoint: String,
    timeout: Duration,
    next_id: AtomicU64,
    sessions: SessionStats,
}

impl ShopifyClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            next_id: AtomicU64::new(1),
            sessions: SessionStats::default(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Opened/released counters of the per-call sessions.
    pub fn session_stats(&self) -> SessionSnapshot {
        self.sessions.snapshot()
    }

    fn next_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Invokes `tool_name` upstream with `arguments`.
    ///
    /// One session is opened per call and released before returning.
    pub async fn call(&self, tool_name: &str, arguments: Value) -> UpstreamResult {
        if tool_name.trim().is_empty() {
            return UpstreamResult::Failure(NormalizedError::transport(
                "upstream tool name must not be empty",
            ));
        }

        let envelope = UpstreamEnvelope::tools_call(self.next_request_id(), tool_name, arguments);
        let span = tracing::info_span!("upstream_call", tool = %tool_name, id = envelope.id);

        async {
            debug!(arguments = %envelope.params.arguments, "calling upstream tool");

            let session = match UpstreamSession::open(self.timeout, &self.sessions) {
                Ok(session) => session,
                Err(e) => {
                    error!(error = %e, "failed to open upstream session");
                    return UpstreamResult::Failure(NormalizedError::transport(e.to_string()));
                }
            };

            let result = self.exchange(&session, &envelope).await;
            drop(session);

            if let UpstreamResult::Failure(err) = &result {
                error!(
                    status_code = ?err.status_code,
                    error_message = %err.error_message,
                    "upstream request failed"
                );
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn exchange(
        &self,
        session: &UpstreamSession<'_>,
        envelope: &UpstreamEnvelope,
    ) -> UpstreamResult {
        let response = match session
            .http()
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(envelope)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return UpstreamResult::Failure(NormalizedError::transport(e.to_string())),
        };

        let status = response.status();

        // The body is read before the status is judged so error detail survives.
        let body = match response.bytes().await {
            Ok(bytes) => UpstreamBody::from_bytes(&bytes),
            Err(e) => return UpstreamResult::Failure(NormalizedError::transport(e.to_string())),
        };

        if !status.is_success() {
            return UpstreamResult::Failure(NormalizedError::http_status(
                status,
                &self.endpoint,
                body,
            ));
        }

        normalize_success(status, body)
    }
}

/// Turns API-reported failures inside a 2xx answer into the normalized shape.
fn normalize_success(status: StatusCode, body: UpstreamBody) -> UpstreamResult {
    if let Some(json) = body.as_json() {
        if let Some(rpc_error) = json.get("error") {
            let detail = api_message(json).unwrap_or_else(|| rpc_error.to_string());
            return UpstreamResult::Failure(NormalizedError::api_reported(
                status,
                detail,
                json.clone(),
            ));
        }

        if json.pointer("/result/isError").and_then(Value::as_bool) == Some(true) {
            let detail = json
                .pointer("/result/content/0/text")
                .and_then(Value::as_str)
                .unwrap_or("tool call failed")
                .to_string();
            warn!(%detail, "upstream tool reported isError");
            return UpstreamResult::Failure(NormalizedError::api_reported(
                status,
                detail,
                json.clone(),
            ));
        }
    }

    UpstreamResult::Success {
        body,
        status: status.as_u16(),
    }
}
