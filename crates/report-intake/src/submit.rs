//! Submission workflow
//!
//! One attempt runs validate, throttle check, dispatch, record. Each stage
//! can stop the attempt with a [`SubmitOutcome`]; none of them panics or
//! leaves the answers unusable, so the caller can always fix and retry.
//! Questionnaires skip the throttle.

use report_core::{
    messages, FieldError, FormAnswers, QuestionnaireAnswers, ValidationEngine, ValidationReport,
};
use report_security::{
    Clock, KeyValueStore, RateLimitConfig, RateLimitInfo, SubmissionGuard, SystemClock,
};
use serde::Serialize;
use std::sync::Arc;

use crate::client::{QuestionnaireSink, ReportSink, SubmissionResponse};
use crate::identity::IdentityProvider;

/// Result of one submission attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Report dispatched and recorded
    Submitted(SubmissionResponse),
    /// Answers failed validation; nothing was sent
    Invalid(Vec<FieldError>),
    /// Throttled; nothing was sent
    RateLimited(RateLimitInfo),
    /// Dispatch failed; carries the user-facing message
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }

    /// Banner text for the outcome
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Submitted(response) => response.message.clone(),
            SubmitOutcome::Invalid(_) => messages::ERROR_VALIDATION.to_string(),
            SubmitOutcome::RateLimited(info) => messages::rate_limited(info.wait_seconds),
            SubmitOutcome::Failed(message) => message.clone(),
        }
    }
}

/// Validate, throttle and dispatch reports for one identity
pub struct SubmissionWorkflow<S, C = SystemClock> {
    engine: ValidationEngine,
    guard: SubmissionGuard<S, C>,
    sink: Arc<dyn ReportSink>,
    identity: Box<dyn IdentityProvider>,
}

impl<S: KeyValueStore> SubmissionWorkflow<S, SystemClock> {
    pub fn new(
        store: S,
        config: RateLimitConfig,
        sink: Arc<dyn ReportSink>,
        identity: Box<dyn IdentityProvider>,
    ) -> Self {
        Self::with_guard(SubmissionGuard::new(store, config), sink, identity)
    }
}

impl<S: KeyValueStore, C: Clock> SubmissionWorkflow<S, C> {
    pub fn with_guard(
        guard: SubmissionGuard<S, C>,
        sink: Arc<dyn ReportSink>,
        identity: Box<dyn IdentityProvider>,
    ) -> Self {
        Self {
            engine: ValidationEngine::new(),
            guard,
            sink,
            identity,
        }
    }

    /// Replace the default rule set
    pub fn with_engine(mut self, engine: ValidationEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn guard(&self) -> &SubmissionGuard<S, C> {
        &self.guard
    }

    pub fn user_id(&self) -> String {
        self.identity.current_user_id()
    }

    /// Validate without dispatching
    pub fn check(&self, answers: &FormAnswers) -> ValidationReport {
        self.engine.validate(answers)
    }

    /// Throttle state for the current identity
    pub fn status(&self) -> RateLimitInfo {
        self.guard.can_submit(&self.user_id())
    }

    /// Run one submission attempt
    pub async fn submit(&self, answers: &FormAnswers) -> SubmitOutcome {
        let report = self.engine.validate(answers);
        if !report.is_valid {
            tracing::debug!(errors = report.errors.len(), "Submission rejected by validation");
            return SubmitOutcome::Invalid(report.errors);
        }

        let user_id = self.user_id();
        let info = self.guard.can_submit(&user_id);
        if !info.is_allowed {
            return SubmitOutcome::RateLimited(info);
        }

        let response = match self.sink.submit(answers, &user_id).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Submission failed");
                return SubmitOutcome::Failed(messages::ERROR_GENERIC.to_string());
            }
        };

        // the report is already out; a lost record only loosens the throttle
        if let Err(e) = self.guard.record_submission(&user_id) {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to record submission");
        }

        tracing::info!(user_id = %user_id, "Submission completed");
        SubmitOutcome::Submitted(response)
    }
}

/// Validate and dispatch questionnaires for one identity
pub struct QuestionnaireWorkflow {
    engine: ValidationEngine<QuestionnaireAnswers>,
    sink: Arc<dyn QuestionnaireSink>,
    identity: Box<dyn IdentityProvider>,
}

impl QuestionnaireWorkflow {
    pub fn new(sink: Arc<dyn QuestionnaireSink>, identity: Box<dyn IdentityProvider>) -> Self {
        Self {
            engine: ValidationEngine::questionnaire(),
            sink,
            identity,
        }
    }

    pub fn user_id(&self) -> String {
        self.identity.current_user_id()
    }

    pub fn check(&self, answers: &QuestionnaireAnswers) -> ValidationReport {
        self.engine.validate(answers)
    }

    /// Run one questionnaire submission
    ///
    /// A dispatch failure is reported with its details, unlike reports.
    pub async fn submit(&self, answers: &QuestionnaireAnswers) -> SubmitOutcome {
        let report = self.engine.validate(answers);
        if !report.is_valid {
            tracing::debug!(errors = report.errors.len(), "Questionnaire rejected by validation");
            return SubmitOutcome::Invalid(report.errors);
        }

        let user_id = self.user_id();
        match self.sink.submit_questionnaire(answers, &user_id).await {
            Ok(response) => {
                tracing::info!(user_id = %user_id, "Questionnaire submitted");
                SubmitOutcome::Submitted(response)
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Questionnaire submission failed");
                SubmitOutcome::Failed(messages::questionnaire_failed(&e.to_string()))
            }
        }
    }
}
