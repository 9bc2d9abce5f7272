//! Rule framework for answer-set validation
//!
//! This module provides the core abstraction for defining and executing
//! validation rules against an answer record. Rules default to the report
//! form's [`FormAnswers`]; the questionnaire rules target
//! [`QuestionnaireAnswers`](crate::questionnaire::QuestionnaireAnswers).

pub mod age;
pub mod format;
pub mod questionnaire;
pub mod required;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::form::FormAnswers;
use crate::validation::FieldError;

/// Categories of validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Mandatory fields are filled in
    Required,
    /// Respondent age is coherent
    Age,
    /// Optional contact and address fields are well formed
    Format,
    /// Closed questions hold one of the offered answers
    Options,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Required => write!(f, "required"),
            RuleCategory::Age => write!(f, "age"),
            RuleCategory::Format => write!(f, "format"),
            RuleCategory::Options => write!(f, "options"),
        }
    }
}

/// Trait for implementing validation rules
///
/// Rules are pure: they read the answers and return field errors without
/// touching anything else. Evaluation is synchronous and never suspends.
pub trait Rule<A = FormAnswers>: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &str;

    /// Human-readable name for this rule
    fn name(&self) -> &str;

    /// Description of what this rule validates
    fn description(&self) -> &str;

    /// Category this rule belongs to
    fn category(&self) -> RuleCategory;

    /// Check if this rule has anything to look at
    fn is_applicable(&self, _answers: &A) -> bool {
        true
    }

    /// Evaluate the rule; an empty result means the answers pass
    fn evaluate(&self, answers: &A) -> Vec<FieldError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        assert_eq!(RuleCategory::Required.to_string(), "required");
        assert_eq!(RuleCategory::Age.to_string(), "age");
        assert_eq!(RuleCategory::Format.to_string(), "format");
        assert_eq!(RuleCategory::Options.to_string(), "options");
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&RuleCategory::Format).unwrap();
        assert_eq!(json, "\"format\"");
    }
}
