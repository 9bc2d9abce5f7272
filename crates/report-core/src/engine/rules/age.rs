//! Respondent age rules

use super::{Rule, RuleCategory};
use crate::form::FormAnswers;
use crate::validation::{validate_age_vs_category, validate_zero_age, FieldError};

/// Rejects an age of zero
pub struct ZeroAgeRule;

impl Rule for ZeroAgeRule {
    fn id(&self) -> &str {
        "zero-age"
    }

    fn name(&self) -> &str {
        "Zero age"
    }

    fn description(&self) -> &str {
        "Rejects a respondent age of zero"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Age
    }

    fn is_applicable(&self, answers: &FormAnswers) -> bool {
        !answers.age.is_empty()
    }

    fn evaluate(&self, answers: &FormAnswers) -> Vec<FieldError> {
        validate_zero_age(&answers.age).into_iter().collect()
    }
}

/// Checks the age against the respondent category's range
pub struct AgeCategoryRule;

impl Rule for AgeCategoryRule {
    fn id(&self) -> &str {
        "age-vs-category"
    }

    fn name(&self) -> &str {
        "Age vs respondent category"
    }

    fn description(&self) -> &str {
        "Validates that the respondent age is within the bounds of the selected category"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Age
    }

    fn is_applicable(&self, answers: &FormAnswers) -> bool {
        !answers.age.is_empty() && !answers.respondent.is_empty()
    }

    fn evaluate(&self, answers: &FormAnswers) -> Vec<FieldError> {
        validate_age_vs_category(&answers.age, &answers.respondent)
            .into_iter()
            .collect()
    }
}
