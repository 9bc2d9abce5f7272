//! Validation engine
//!
//! Orchestrates rule evaluation against an answer set and summarises the
//! outcome. For the report form the error list of a [`ValidationReport`] is
//! identical to what [`validate_form`](crate::validation::validate_form)
//! returns; for the questionnaire it matches
//! [`validate_questionnaire`](crate::questionnaire::validate_questionnaire).
//! The engine adds per-rule bookkeeping on top.

pub mod rules;

use rules::{Rule, RuleCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::form::FormAnswers;
use crate::questionnaire::QuestionnaireAnswers;
use crate::validation::FieldError;

/// Result of a validation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the answers may be submitted
    pub is_valid: bool,
    /// Every field error, in rule order
    pub errors: Vec<FieldError>,
    /// Number of rules that applied to these answers
    pub rules_evaluated: usize,
    /// Rules that produced no errors
    pub rules_passed: usize,
    /// Rules that produced at least one error
    pub rules_failed: usize,
    /// Validation duration in microseconds
    pub duration_us: u64,
    /// Breakdown by category
    pub category_summary: HashMap<RuleCategory, CategorySummary>,
}

/// Summary for a single rule category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorySummary {
    pub rules_evaluated: usize,
    pub rules_passed: usize,
    pub error_count: usize,
}

/// The core validation engine
///
/// Generic over the answer record; defaults to the report form.
pub struct ValidationEngine<A = FormAnswers> {
    /// Registered validation rules
    rules: Vec<Arc<dyn Rule<A>>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationEngine {
    /// Create a new validation engine with the form's rules
    pub fn new() -> Self {
        let mut engine = Self::empty();
        engine.register(Arc::new(rules::required::RequiredFieldsRule));
        engine.register(Arc::new(rules::age::ZeroAgeRule));
        engine.register(Arc::new(rules::age::AgeCategoryRule));
        engine.register(Arc::new(rules::format::FormatRule::email()));
        engine.register(Arc::new(rules::format::FormatRule::phone()));
        engine.register(Arc::new(rules::format::FormatRule::postal_code()));
        engine
    }
}

impl ValidationEngine<QuestionnaireAnswers> {
    /// Create a validation engine with the questionnaire's rules
    pub fn questionnaire() -> Self {
        let mut engine = Self::empty();
        engine.register(Arc::new(rules::questionnaire::SectionSelectedRule));
        engine.register(Arc::new(rules::questionnaire::SectionRequiredRule));
        engine.register(Arc::new(rules::questionnaire::QuestionnaireAgeRule));
        engine.register(Arc::new(rules::questionnaire::AnswerOptionsRule));
        engine
    }
}

impl<A> ValidationEngine<A> {
    /// Create an empty validation engine (no default rules)
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a validation rule
    pub fn register(&mut self, rule: Arc<dyn Rule<A>>) {
        self.rules.push(rule);
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Arc<dyn Rule<A>>] {
        &self.rules
    }

    /// Validate an answer set
    ///
    /// Deterministic and side-effect free: every applicable rule runs, and
    /// all errors are kept.
    pub fn validate(&self, answers: &A) -> ValidationReport {
        let start = std::time::Instant::now();
        let mut builder = ReportBuilder::default();

        for rule in self.rules.iter().filter(|r| r.is_applicable(answers)) {
            let errors = rule.evaluate(answers);
            tracing::trace!(
                rule = rule.id(),
                errors = errors.len(),
                "Rule evaluated"
            );
            builder.add_rule_result(rule.category(), errors);
        }

        let report = builder.finalize(start.elapsed());
        tracing::debug!(
            valid = report.is_valid,
            errors = report.errors.len(),
            rules_evaluated = report.rules_evaluated,
            "Answer set validated"
        );
        report
    }
}

#[derive(Default)]
struct ReportBuilder {
    errors: Vec<FieldError>,
    rules_evaluated: usize,
    rules_passed: usize,
    rules_failed: usize,
    category_summary: HashMap<RuleCategory, CategorySummary>,
}

impl ReportBuilder {
    fn add_rule_result(&mut self, category: RuleCategory, errors: Vec<FieldError>) {
        self.rules_evaluated += 1;
        let summary = self.category_summary.entry(category).or_default();
        summary.rules_evaluated += 1;

        if errors.is_empty() {
            self.rules_passed += 1;
            summary.rules_passed += 1;
        } else {
            self.rules_failed += 1;
            summary.error_count += errors.len();
            self.errors.extend(errors);
        }
    }

    fn finalize(self, duration: std::time::Duration) -> ValidationReport {
        ValidationReport {
            is_valid: self.errors.is_empty(),
            errors: self.errors,
            rules_evaluated: self.rules_evaluated,
            rules_passed: self.rules_passed,
            rules_failed: self.rules_failed,
            duration_us: duration.as_micros() as u64,
            category_summary: self.category_summary,
        }
    }
}
