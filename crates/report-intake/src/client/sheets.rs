//! Spreadsheet webhook client
//!
//! Posts one report as JSON to an Apps Script style endpoint:
//! - single request, no retry
//! - the response body is never read; the endpoint does not return a
//!   usable one, so a completed request counts as success
//! - any transport failure is an error

use async_trait::async_trait;
use reqwest::Client;
use report_core::FormAnswers;
use report_security::sanitize_answers;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use super::{ReportSink, SubmissionResponse};
use crate::config::{IntakeConfig, DEFAULT_USER_AGENT};
use crate::error::{IntakeError, Result};

/// Body sent to the endpoint: the answers plus submission metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(flatten)]
    pub answers: FormAnswers,
    #[serde(rename = "userId")]
    pub user_id: String,
    /// ISO-8601 UTC
    pub timestamp: String,
    #[serde(rename = "userAgent")]
    pub user_agent: String,
}

impl SubmissionPayload {
    /// Sanitize `answers` and attach metadata stamped now
    pub fn new(answers: &FormAnswers, user_id: &str, user_agent: &str) -> Self {
        Self {
            answers: sanitize_answers(answers),
            user_id: user_id.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            user_agent: user_agent.to_string(),
        }
    }
}

/// HTTP client for the spreadsheet webhook
pub struct SheetsClient {
    client: Client,
    endpoint: String,
    user_agent: String,
    timeout_ms: u64,
}

impl SheetsClient {
    /// Create a client from the intake configuration
    pub fn from_config(config: &IntakeConfig) -> Result<Self> {
        SheetsClientBuilder::new()
            .endpoint(&config.endpoint_url)
            .user_agent(&config.user_agent)
            .timeout_ms(config.timeout_ms)
            .build()
    }

    /// Whether an endpoint URL is set
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    async fn send(&self, payload: &SubmissionPayload, request_id: &Uuid) -> Result<()> {
        self.client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("X-Request-Id", request_id.to_string())
            .json(payload)
            .send()
            .await
            .map_err(|e| IntakeError::Transport(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ReportSink for SheetsClient {
    async fn submit(&self, answers: &FormAnswers, user_id: &str) -> Result<SubmissionResponse> {
        if !self.is_configured() {
            return Err(IntakeError::NotConfigured);
        }

        let payload = SubmissionPayload::new(answers, user_id, &self.user_agent);
        let request_id = Uuid::new_v4();

        tracing::debug!(
            request_id = %request_id,
            user_id = %user_id,
            "Dispatching report"
        );

        if let Err(e) = self.send(&payload, &request_id).await {
            tracing::error!(
                request_id = %request_id,
                error = %e,
                "Failed to dispatch report"
            );
            return Err(e);
        }

        tracing::info!(request_id = %request_id, "Report dispatched");
        Ok(SubmissionResponse::success(
            request_id.to_string(),
            payload.timestamp,
        ))
    }

    fn is_configured(&self) -> bool {
        SheetsClient::is_configured(self)
    }
}

/// Builder for SheetsClient
pub struct SheetsClientBuilder {
    endpoint: String,
    user_agent: String,
    timeout_ms: u64,
}

impl SheetsClientBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            endpoint: String::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: 30_000,
        }
    }

    /// Set the endpoint URL
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set the user agent reported in the payload
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the request timeout
    pub fn timeout_ms(mut self, timeout: u64) -> Self {
        self.timeout_ms = timeout;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<SheetsClient> {
        let client = Client::builder()
            .timeout(Duration::from_millis(self.timeout_ms))
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|e| IntakeError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(SheetsClient {
            client,
            endpoint: self.endpoint,
            user_agent: self.user_agent,
            timeout_ms: self.timeout_ms,
        })
    }
}

impl Default for SheetsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
