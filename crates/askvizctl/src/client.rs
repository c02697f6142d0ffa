//! HTTP transport to the analytics backend.
//!
//! This module is the single place raw transport failures are translated
//! into the [`QueryError`] taxonomy; reqwest error shapes do not leak past
//! this boundary.

use std::time::{Duration, Instant};

use anyhow::Result;
use askviz_common::{BackendConfig, QueryError, RawResponse};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Sends a question to the backend and yields the raw response
///
/// The orchestration layer is written against this trait so it can be
/// exercised without a network.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, question: &str) -> Result<RawResponse, QueryError>;
}

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

/// reqwest-backed client for `POST {base_url}/ask`
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for BackendClient {
    async fn send(&self, question: &str) -> Result<RawResponse, QueryError> {
        let req_id = Uuid::new_v4();
        let url = format!("{}/ask", self.base_url);
        let started = Instant::now();
        debug!(%req_id, chars = question.len(), "sending question");

        let response = self
            .http
            .post(&url)
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(|e| {
                warn!(%req_id, "request failed: {}", e);
                classify_send_error(&e)
            })?;

        let status = response.status();
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(%req_id, %status, "undecodable response body: {}", e);
                return Err(QueryError::Unknown);
            }
        };
        info!(
            %req_id,
            %status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend answered"
        );

        interpret_body(status.is_success(), body)
    }
}

/// Classify a reqwest failure that produced no usable HTTP response
fn classify_send_error(err: &reqwest::Error) -> QueryError {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        QueryError::Network
    } else {
        QueryError::Unknown
    }
}

/// Interpret a decoded response body under the error taxonomy
///
/// Non-2xx bodies may carry `{"error": <message>}`; the message is surfaced
/// verbatim. A JSON `null` success body stands for an absent payload and is
/// handed to the resolver as such. Kept free of reqwest types so the mapping
/// is testable without a server.
fn interpret_body(success: bool, body: Value) -> Result<RawResponse, QueryError> {
    if !success {
        return Err(match body.get("error").and_then(Value::as_str) {
            Some(message) => QueryError::Server(message.to_string()),
            None => QueryError::Unknown,
        });
    }
    if body.is_null() {
        return Ok(RawResponse::default());
    }
    serde_json::from_value(body).map_err(|_| QueryError::Unknown)
}
