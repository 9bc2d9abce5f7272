//! Output formatting for the intake CLI
//!
//! Every command result renders as JSON, YAML, or a colored human-readable
//! table.

use clap::ValueEnum;
use colored::Colorize;
use report_core::{
    field_label, FieldError, QuestionnaireAnswers, QuestionnaireField, ValidationReport,
};
use report_security::RateLimitInfo;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::error::{IntakeError, Result};
use crate::submit::SubmitOutcome;

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// A command result that can be printed in any [`OutputFormat`]
pub trait Render: Serialize {
    fn render_table(&self, out: &mut dyn Write) -> io::Result<()>;

    fn render(&self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(self)?);
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(self)?);
            }
            OutputFormat::Table => {
                let mut stdout = io::stdout();
                self.render_table(&mut stdout)
                    .and_then(|_| stdout.flush())
                    .map_err(|e| IntakeError::SerializationError(e.to_string()))?;
            }
        }
        Ok(())
    }
}

/// Field error as shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldErrorOutput {
    pub field: String,
    pub label: String,
    pub message: String,
}

impl FieldErrorOutput {
    pub fn from_error(error: &FieldError) -> Self {
        Self {
            field: error.field.clone(),
            label: field_label(&error.field).to_string(),
            message: error.message.clone(),
        }
    }

    pub fn from_questionnaire_error(error: &FieldError) -> Self {
        let label = QuestionnaireField::from_key(&error.field)
            .map_or(error.field.as_str(), |field| field.label());
        Self {
            field: error.field.clone(),
            label: label.to_string(),
            message: error.message.clone(),
        }
    }
}

fn write_errors(out: &mut dyn Write, errors: &[FieldErrorOutput]) -> io::Result<()> {
    writeln!(out, "{}", "Errors:".cyan().bold())?;
    writeln!(out, "{}", "-".repeat(60))?;
    for (index, error) in errors.iter().enumerate() {
        writeln!(
            out,
            "{} {}. {} {}",
            "x".red(),
            index + 1,
            error.label.bold(),
            format!("({})", error.field).dimmed()
        )?;
        writeln!(out, "     {}", error.message)?;
    }
    Ok(())
}

/// Result of `validate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutput {
    pub valid: bool,
    pub error_count: usize,
    pub errors: Vec<FieldErrorOutput>,
    pub summary: String,
    pub rules_evaluated: usize,
    pub rules_passed: usize,
    pub duration_us: u64,
}

impl ValidationOutput {
    pub fn from_report(report: &ValidationReport) -> Self {
        let summary = if report.is_valid {
            "Answers are valid".to_string()
        } else {
            format!("Answers have {} error(s)", report.errors.len())
        };

        Self {
            valid: report.is_valid,
            error_count: report.errors.len(),
            errors: report.errors.iter().map(FieldErrorOutput::from_error).collect(),
            summary,
            rules_evaluated: report.rules_evaluated,
            rules_passed: report.rules_passed,
            duration_us: report.duration_us,
        }
    }
}

impl Render for ValidationOutput {
    fn render_table(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "Validation Results".cyan().bold())?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out)?;

        let icon = if self.valid { "+".green() } else { "x".red() };
        writeln!(out, "{} {}", icon, self.summary)?;
        writeln!(
            out,
            "  Rules: {} evaluated, {} passed",
            self.rules_evaluated, self.rules_passed
        )?;
        writeln!(out)?;

        if !self.errors.is_empty() {
            write_errors(out, &self.errors)?;
            writeln!(out)?;
        }

        writeln!(out, "Completed in {} µs", self.duration_us.to_string().dimmed())
    }
}

/// Result of `submit`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionOutput {
    /// `submitted`, `invalid`, `rate_limited` or `failed`
    pub outcome: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<FieldErrorOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_seconds: Option<u64>,
}

impl SubmissionOutput {
    pub fn from_outcome(outcome: &SubmitOutcome) -> Self {
        let mut output = Self {
            outcome: String::new(),
            message: outcome.message(),
            request_id: None,
            timestamp: None,
            errors: Vec::new(),
            wait_seconds: None,
        };

        match outcome {
            SubmitOutcome::Submitted(response) => {
                output.outcome = "submitted".to_string();
                output.request_id = response.id.clone();
                output.timestamp = response.timestamp.clone();
            }
            SubmitOutcome::Invalid(errors) => {
                output.outcome = "invalid".to_string();
                output.errors = errors.iter().map(FieldErrorOutput::from_error).collect();
            }
            SubmitOutcome::RateLimited(info) => {
                output.outcome = "rate_limited".to_string();
                output.wait_seconds = Some(info.wait_seconds);
            }
            SubmitOutcome::Failed(_) => {
                output.outcome = "failed".to_string();
            }
        }
        output
    }
}

impl Render for SubmissionOutput {
    fn render_table(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "Submission".cyan().bold())?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out)?;

        let line = match self.outcome.as_str() {
            "submitted" => format!("{} {}", "+".green(), self.message.green()),
            "rate_limited" => format!("{} {}", "!".yellow(), self.message.yellow()),
            _ => format!("{} {}", "x".red(), self.message.red()),
        };
        writeln!(out, "{}", line)?;

        if let Some(id) = &self.request_id {
            writeln!(out, "  Request: {}", id.dimmed())?;
        }
        if let Some(timestamp) = &self.timestamp {
            writeln!(out, "  Sent at: {}", timestamp.dimmed())?;
        }

        if !self.errors.is_empty() {
            writeln!(out)?;
            write_errors(out, &self.errors)?;
        }
        Ok(())
    }
}

/// Result of `status` and `clear`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOutput {
    pub user_id: String,
    pub allowed: bool,
    pub remaining_attempts: u32,
    pub max_attempts: u32,
    pub wait_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_allowed_time: Option<String>,
    /// Stored submissions as ISO-8601 timestamps
    pub recent_submissions: Vec<String>,
}

impl StatusOutput {
    pub fn new(
        user_id: impl Into<String>,
        info: &RateLimitInfo,
        remaining_attempts: u32,
        max_attempts: u32,
        history: &[i64],
    ) -> Self {
        let next_allowed_time = if info.is_allowed {
            None
        } else {
            Some(millis_to_rfc3339(info.next_allowed_time))
        };

        Self {
            user_id: user_id.into(),
            allowed: info.is_allowed,
            remaining_attempts,
            max_attempts,
            wait_seconds: info.wait_seconds,
            next_allowed_time,
            recent_submissions: history.iter().map(|t| millis_to_rfc3339(*t)).collect(),
        }
    }
}

fn millis_to_rfc3339(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
        .unwrap_or_else(|| millis.to_string())
}

impl Render for StatusOutput {
    fn render_table(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "Submission Status".cyan().bold())?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out)?;

        writeln!(out, "  User:      {}", self.user_id.bold())?;
        if self.allowed {
            writeln!(out, "  Status:    {}", "allowed".green())?;
        } else {
            writeln!(
                out,
                "  Status:    {} (wait {}s)",
                "throttled".yellow(),
                self.wait_seconds
            )?;
        }
        writeln!(
            out,
            "  Remaining: {}/{}",
            self.remaining_attempts, self.max_attempts
        )?;
        if let Some(next) = &self.next_allowed_time {
            writeln!(out, "  Next:      {}", next)?;
        }

        if !self.recent_submissions.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "Recent submissions:".cyan().bold())?;
            for timestamp in &self.recent_submissions {
                writeln!(out, "  - {}", timestamp.dimmed())?;
            }
        }
        Ok(())
    }
}

/// Result of `questionnaire`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireOutput {
    /// Section label, absent until a profile leads to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Required fields answered, in percent
    pub progress: u8,
    pub valid: bool,
    pub errors: Vec<FieldErrorOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<SubmissionOutput>,
}

impl QuestionnaireOutput {
    pub fn new(answers: &QuestionnaireAnswers, report: &ValidationReport) -> Self {
        Self {
            section: answers.target_section().map(|s| s.label().to_string()),
            progress: answers.progress_percentage(),
            valid: report.is_valid,
            errors: report
                .errors
                .iter()
                .map(FieldErrorOutput::from_questionnaire_error)
                .collect(),
            submission: None,
        }
    }

    pub fn with_submission(mut self, outcome: &SubmitOutcome) -> Self {
        self.submission = Some(SubmissionOutput::from_outcome(outcome));
        self
    }
}

impl Render for QuestionnaireOutput {
    fn render_table(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "Questionnaire".cyan().bold())?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out)?;

        match &self.section {
            Some(section) => writeln!(out, "  Section:  {}", section.bold())?,
            None => writeln!(out, "  Section:  {}", "not selected".yellow())?,
        }
        let filled = usize::from(self.progress) * 20 / 100;
        writeln!(
            out,
            "  Progress: [{}{}] {}%",
            "#".repeat(filled).green(),
            "-".repeat(20 - filled).dimmed(),
            self.progress
        )?;

        if !self.errors.is_empty() {
            writeln!(out)?;
            write_errors(out, &self.errors)?;
        }
        if let Some(submission) = &self.submission {
            submission.render_table(out)?;
        }
        Ok(())
    }
}
