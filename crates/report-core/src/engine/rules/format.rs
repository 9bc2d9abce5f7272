//! Optional-field format rules
//!
//! An empty optional field means "not provided" and always passes; these
//! rules only look at values that were filled in.

use super::{Rule, RuleCategory};
use crate::form::{Field, FieldValue, FormAnswers};
use crate::validation::{validate_cep, validate_email, validate_phone, FieldError};

/// Shared shape of the format rules: one field, one check
pub struct FormatRule {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    field: Field,
    check: fn(&str) -> Option<FieldError>,
}

impl FormatRule {
    /// Email must look like `local@domain.tld`
    pub fn email() -> Self {
        Self {
            id: "email-format",
            name: "Email format",
            description: "Validates the contact email shape when one is given",
            field: Field::Email,
            check: validate_email,
        }
    }

    /// Phone must carry 10 or 11 digits
    pub fn phone() -> Self {
        Self {
            id: "phone-format",
            name: "Phone format",
            description: "Validates the contact phone digit count when one is given",
            field: Field::Phone,
            check: validate_phone,
        }
    }

    /// CEP must read `00000-000`, hyphen optional
    pub fn postal_code() -> Self {
        Self {
            id: "cep-format",
            name: "Postal code format",
            description: "Validates the CEP layout when one is given",
            field: Field::PostalCode,
            check: validate_cep,
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    fn text<'a>(&self, answers: &'a FormAnswers) -> &'a str {
        match answers.value(self.field) {
            FieldValue::Text(s) => s,
            FieldValue::Flag(_) => "",
        }
    }
}

impl Rule for FormatRule {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Format
    }

    fn is_applicable(&self, answers: &FormAnswers) -> bool {
        !self.text(answers).is_empty()
    }

    fn evaluate(&self, answers: &FormAnswers) -> Vec<FieldError> {
        (self.check)(self.text(answers)).into_iter().collect()
    }
}
