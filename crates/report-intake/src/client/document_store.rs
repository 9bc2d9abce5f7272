//! Document store client
//!
//! Adds one document per submission to the `reports` collection of a
//! Firestore-compatible REST API, under
//! `artifacts/{app_id}/public/data/reports`. Unlike the spreadsheet webhook
//! the store answers with a status and the created document, so a non-2xx
//! reply is an error and the document id becomes the response id.

use async_trait::async_trait;
use reqwest::Client;
use report_core::{FormAnswers, QuestionnaireAnswers};
use report_security::sanitize_questionnaire;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use uuid::Uuid;

use super::{QuestionnaireSink, ReportSink, SubmissionPayload, SubmissionResponse};
use crate::config::{DocumentStoreConfig, IntakeConfig, DEFAULT_USER_AGENT};
use crate::error::{IntakeError, Result};

/// Name of the collection documents are added to
pub const COLLECTION: &str = "reports";

#[derive(Debug, Deserialize)]
struct CreatedDocument {
    name: String,
}

/// HTTP client for the document store
pub struct DocumentStoreClient {
    client: Client,
    settings: DocumentStoreConfig,
    user_agent: String,
}

impl DocumentStoreClient {
    /// Create a client from the intake configuration
    pub fn from_config(config: &IntakeConfig) -> Result<Self> {
        Self::new(
            config.document_store.clone(),
            &config.user_agent,
            config.timeout_ms,
        )
    }

    pub fn new(settings: DocumentStoreConfig, user_agent: &str, timeout_ms: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(user_agent)
            .build()
            .map_err(|e| IntakeError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            settings,
            user_agent: user_agent.to_string(),
        })
    }

    /// Client for a project on the given API root, with default settings
    pub fn for_project(base_url: &str, project_id: &str) -> Result<Self> {
        let settings = DocumentStoreConfig {
            base_url: base_url.to_string(),
            project_id: project_id.to_string(),
            ..Default::default()
        };
        Self::new(settings, DEFAULT_USER_AGENT, 30_000)
    }

    pub fn is_configured(&self) -> bool {
        self.settings.is_configured()
    }

    /// Collection URL documents are posted to
    pub fn collection_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents/artifacts/{}/public/data/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.project_id,
            self.settings.app_id,
            COLLECTION
        )
    }

    /// Add one document and return its id
    pub async fn add_document(&self, fields: Map<String, Value>) -> Result<String> {
        if !self.is_configured() {
            return Err(IntakeError::NotConfigured);
        }

        let request_id = Uuid::new_v4();
        let body = json!({ "fields": encode_fields(fields) });

        let mut request = self
            .client
            .post(self.collection_url())
            .header("X-Request-Id", request_id.to_string())
            .json(&body);
        if !self.settings.auth_token.is_empty() {
            request = request.header(
                "Authorization",
                format!("Bearer {}", self.settings.auth_token),
            );
        }

        tracing::debug!(request_id = %request_id, "Adding document");
        let response = request
            .send()
            .await
            .map_err(|e| IntakeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                request_id = %request_id,
                status = status.as_u16(),
                body = %error_text,
                "Document store rejected the document"
            );
            return Err(IntakeError::Transport(format!(
                "document store returned {}",
                status
            )));
        }

        // a reply without a readable name still stored the document
        let id = match response.json::<CreatedDocument>().await {
            Ok(created) => created
                .name
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string(),
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Unreadable document reply");
                request_id.to_string()
            }
        };

        tracing::info!(request_id = %request_id, document_id = %id, "Document added");
        Ok(id)
    }
}

#[async_trait]
impl ReportSink for DocumentStoreClient {
    async fn submit(&self, answers: &FormAnswers, user_id: &str) -> Result<SubmissionResponse> {
        let payload = SubmissionPayload::new(answers, user_id, &self.user_agent);
        let fields = match serde_json::to_value(&payload)? {
            Value::Object(fields) => fields,
            _ => return Err(IntakeError::SerializationError("payload is not an object".into())),
        };

        let id = self.add_document(fields).await?;
        Ok(SubmissionResponse::success(id, payload.timestamp))
    }

    fn is_configured(&self) -> bool {
        DocumentStoreClient::is_configured(self)
    }
}

#[async_trait]
impl QuestionnaireSink for DocumentStoreClient {
    async fn submit_questionnaire(
        &self,
        answers: &QuestionnaireAnswers,
        user_id: &str,
    ) -> Result<SubmissionResponse> {
        let clean = sanitize_questionnaire(answers);
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut fields = clean.document_fields();
        fields.insert("userId".to_string(), Value::String(user_id.to_string()));
        fields.insert("timestamp".to_string(), Value::String(timestamp.clone()));

        let id = self.add_document(fields).await?;
        Ok(SubmissionResponse::success(id, timestamp)
            .with_message(report_core::messages::QUESTIONNAIRE_SUCCESS))
    }
}

/// Wrap plain JSON fields in the store's typed value envelope
pub fn encode_fields(fields: Map<String, Value>) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(key, value)| (key, encode_value(value)))
            .collect(),
    )
}

fn encode_value(value: Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.into_iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}
