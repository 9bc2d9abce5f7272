//! Required field rule
//!
//! Flags every mandatory field that is blank or, for checkboxes, unchecked.

use super::{Rule, RuleCategory};
use crate::form::{Field, FormAnswers};
use crate::messages;
use crate::validation::FieldError;

/// Rule for validating the form's required set is filled
pub struct RequiredFieldsRule;

impl Rule for RequiredFieldsRule {
    fn id(&self) -> &str {
        "required-fields"
    }

    fn name(&self) -> &str {
        "Required fields"
    }

    fn description(&self) -> &str {
        "Validates that required fields are non-blank and required boxes are checked"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Required
    }

    fn evaluate(&self, answers: &FormAnswers) -> Vec<FieldError> {
        Field::REQUIRED
            .iter()
            .filter(|field| answers.value(**field).is_missing())
            .map(|field| FieldError::new(field.key(), messages::required(field.label())))
            .collect()
    }
}
