//! Remote submission endpoints
//!
//! A [`ReportSink`] accepts one sanitized answer set plus metadata. Reports
//! go either to a spreadsheet webhook or to a document store collection;
//! questionnaires only go to the document store, through
//! [`QuestionnaireSink`].

pub mod document_store;
pub mod sheets;

pub use document_store::DocumentStoreClient;
pub use sheets::{SheetsClient, SheetsClientBuilder, SubmissionPayload};

use async_trait::async_trait;
use report_core::{FormAnswers, QuestionnaireAnswers};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Outcome status reported to the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Success,
    Error,
}

/// Result of a dispatched report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub status: SubmissionStatus,
    pub message: String,
    /// Client-generated request id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// ISO-8601 dispatch time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl SubmissionResponse {
    pub fn success(id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            status: SubmissionStatus::Success,
            message: report_core::messages::SUCCESS.to_string(),
            id: Some(id.into()),
            timestamp: Some(timestamp.into()),
        }
    }

    /// Replace the banner text
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == SubmissionStatus::Success
    }
}

/// Destination for submitted reports
///
/// A returned `Ok` means the request completed. The webhook's reply is not
/// read, so there it says nothing about how the remote side handled the
/// report; the document store checks the reply status.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn submit(&self, answers: &FormAnswers, user_id: &str) -> Result<SubmissionResponse>;

    /// Whether the sink has somewhere to send to
    fn is_configured(&self) -> bool {
        true
    }
}

/// Destination for questionnaire answers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionnaireSink: Send + Sync {
    async fn submit_questionnaire(
        &self,
        answers: &QuestionnaireAnswers,
        user_id: &str,
    ) -> Result<SubmissionResponse>;
}
