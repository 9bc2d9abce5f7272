//! Field-level validation checks
//!
//! Each check is a pure function returning data: an empty result means the
//! answers pass. [`validate_form`] runs every applicable check and keeps all
//! errors so a front end can show every problem at once.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::form::{Field, FormAnswers, RespondentCategory};
use crate::messages;

/// A problem with one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire key of the offending field
    pub field: String,
    /// Message shown next to the field
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// First message recorded for `field`, if any
pub fn error_for<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}

/// Drop the errors of a field the user started correcting
pub fn clear_field(errors: &mut Vec<FieldError>, field: &str) {
    errors.retain(|e| e.field != field);
}

/// Parse an age the way the form does: optional leading whitespace and sign,
/// then the leading run of digits. Trailing text is ignored.
pub fn parse_age(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    // Overlong digit runs saturate; they are out of every range anyway.
    let value = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Zero is rejected separately from "missing" and "out of range"
pub fn validate_zero_age(age: &str) -> Option<FieldError> {
    match parse_age(age) {
        Some(0) => Some(FieldError::new(Field::Age.key(), messages::ERROR_ZERO_AGE)),
        _ => None,
    }
}

/// Check the respondent age against the category's accepted range
pub fn validate_age_vs_category(age: &str, category: &str) -> Option<FieldError> {
    let Some(age_num) = parse_age(age) else {
        return Some(FieldError::new(Field::Age.key(), messages::ERROR_INVALID_AGE));
    };

    let Ok(category) = category.parse::<RespondentCategory>() else {
        return Some(FieldError::new(
            Field::Respondent.key(),
            messages::ERROR_INVALID_CATEGORY,
        ));
    };

    let range = category.age_range();
    if !range.contains(age_num) {
        return Some(FieldError::new(
            Field::Age.key(),
            messages::age_out_of_range(category.label(), range.min, range.max, age_num),
        ));
    }

    None
}

/// One error per required field that is blank or unchecked
pub fn validate_required_fields(answers: &FormAnswers) -> Vec<FieldError> {
    Field::REQUIRED
        .iter()
        .filter(|field| answers.value(**field).is_missing())
        .map(|field| FieldError::new(field.key(), messages::required(field.label())))
        .collect()
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

fn cep_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{5}-?[0-9]{3}$").expect("valid CEP pattern"))
}

/// Optional; when given it must look like `local@domain.tld`
pub fn validate_email(email: &str) -> Option<FieldError> {
    if email.is_empty() || email_regex().is_match(email) {
        return None;
    }
    Some(FieldError::new(Field::Email.key(), messages::ERROR_EMAIL))
}

/// Optional; when given it must hold 10 or 11 digits once formatting is dropped
pub fn validate_phone(phone: &str) -> Option<FieldError> {
    if phone.is_empty() {
        return None;
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if digits == 10 || digits == 11 {
        return None;
    }
    Some(FieldError::new(Field::Phone.key(), messages::ERROR_PHONE))
}

/// Optional; when given it must read `00000-000` or `00000000`
pub fn validate_cep(cep: &str) -> Option<FieldError> {
    if cep.is_empty() || cep_regex().is_match(cep) {
        return None;
    }
    Some(FieldError::new(Field::PostalCode.key(), messages::ERROR_CEP))
}

/// Run every applicable check and concatenate the errors
pub fn validate_form(answers: &FormAnswers) -> Vec<FieldError> {
    let mut errors = validate_required_fields(answers);

    if !answers.age.is_empty() {
        errors.extend(validate_zero_age(&answers.age));
    }

    if !answers.age.is_empty() && !answers.respondent.is_empty() {
        errors.extend(validate_age_vs_category(&answers.age, &answers.respondent));
    }

    errors.extend(validate_email(&answers.email));
    errors.extend(validate_phone(&answers.phone));
    errors.extend(validate_cep(&answers.postal_code));

    errors
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    pub(crate) fn complete_answers() -> FormAnswers {
        FormAnswers {
            respondent: "Mãe/Pai ou responsável".to_string(),
            age: "34".to_string(),
            child_name: "Ana".to_string(),
            child_age: "9".to_string(),
            gender: "Feminino".to_string(),
            report_category: "Negligência".to_string(),
            description: "Relato detalhado".to_string(),
            consent: true,
            privacy_policy: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("15"), Some(15));
        assert_eq!(parse_age(" 7"), Some(7));
        assert_eq!(parse_age("12 anos"), Some(12));
        assert_eq!(parse_age("3.9"), Some(3));
        assert_eq!(parse_age("-4"), Some(-4));
        assert_eq!(parse_age("abc"), None);
        assert_eq!(parse_age(""), None);
        assert_eq!(parse_age("-"), None);
    }

    #[test]
    fn test_zero_age() {
        let err = validate_zero_age("0").unwrap();
        assert_eq!(err.field, "idade");
        assert_eq!(err.message, messages::ERROR_ZERO_AGE);
        assert!(validate_zero_age("00").is_some());
        assert!(validate_zero_age("10").is_none());
        assert!(validate_zero_age("abc").is_none());
    }

    #[test]
    fn test_zero_age_regardless_of_category() {
        for category in RespondentCategory::ALL {
            let answers = FormAnswers {
                respondent: category.label().to_string(),
                age: "0".to_string(),
                ..complete_answers()
            };
            let errors = validate_form(&answers);
            assert!(errors.iter().any(|e| e.message == messages::ERROR_ZERO_AGE));
        }
    }

    #[test]
    fn test_age_vs_category_invalid_age() {
        let err = validate_age_vs_category("muitos", "Criança").unwrap();
        assert_eq!(err.field, "idade");
        assert_eq!(err.message, messages::ERROR_INVALID_AGE);
    }

    #[test]
    fn test_age_vs_category_unknown_category() {
        let err = validate_age_vs_category("10", "Avó").unwrap();
        assert_eq!(err.field, "quemResponde");
        assert_eq!(err.message, messages::ERROR_INVALID_CATEGORY);
    }

    #[test]
    fn test_age_vs_category_out_of_range() {
        let err = validate_age_vs_category("15", "Criança").unwrap();
        assert_eq!(err.field, "idade");
        assert!(err.message.contains("Criança"));
        assert!(err.message.contains('3'));
        assert!(err.message.contains("12"));
        assert!(err.message.contains("(15)"));

        assert!(validate_age_vs_category("12", "Criança").is_none());
        assert!(validate_age_vs_category("17", "Adolescente").is_none());
        assert!(validate_age_vs_category("101", "Mãe/Pai ou responsável").is_some());
    }

    proptest! {
        #[test]
        fn prop_age_vs_category_matches_range(age in -10i64..200, idx in 0usize..4) {
            let category = RespondentCategory::ALL[idx];
            let range = category.age_range();
            let result = validate_age_vs_category(&age.to_string(), category.label());

            prop_assert_eq!(result.is_some(), age < range.min || age > range.max);
            if let Some(err) = result {
                prop_assert!(err.message.contains(category.label()));
                prop_assert!(err.message.contains(&range.min.to_string()));
                prop_assert!(err.message.contains(&range.max.to_string()));
            }
        }
    }

    #[test]
    fn test_required_fields_all_missing() {
        let errors = validate_required_fields(&FormAnswers::default());
        assert_eq!(errors.len(), Field::REQUIRED.len());
        for field in Field::REQUIRED {
            assert_eq!(errors.iter().filter(|e| e.field == field.key()).count(), 1);
        }
        assert_eq!(
            error_for(&errors, "nomeCrianca"),
            Some("Nome da criança é obrigatório.")
        );
    }

    #[test]
    fn test_required_fields_complete() {
        assert!(validate_required_fields(&complete_answers()).is_empty());
    }

    #[test]
    fn test_required_fields_blank_and_false() {
        let answers = FormAnswers {
            description: "  \t".to_string(),
            consent: false,
            ..complete_answers()
        };
        let errors = validate_required_fields(&answers);
        assert_eq!(errors.len(), 2);
        assert!(error_for(&errors, "descricao").is_some());
        assert!(error_for(&errors, "consentimento").is_some());
    }

    #[test]
    fn test_optional_formats() {
        assert!(validate_email("").is_none());
        assert!(validate_email("a@b.com").is_none());
        assert_eq!(validate_email("not-an-email").unwrap().field, "email");

        assert!(validate_phone("").is_none());
        assert!(validate_phone("11987654321").is_none());
        assert!(validate_phone("(11) 3456-7890").is_none());
        assert_eq!(validate_phone("123").unwrap().field, "telefone");

        assert!(validate_cep("").is_none());
        assert!(validate_cep("12345-678").is_none());
        assert!(validate_cep("12345678").is_none());
        assert_eq!(validate_cep("1234").unwrap().field, "cep");
        // only ASCII digits count
        assert!(validate_cep("١٢٣٤٥-٦٧٨").is_some());
        assert!(validate_cep("１２３４５-６７８").is_some());
    }

    #[test]
    fn test_validate_form_collects_everything() {
        let answers = FormAnswers {
            respondent: "Criança".to_string(),
            age: "40".to_string(),
            email: "x".to_string(),
            phone: "1".to_string(),
            postal_code: "1".to_string(),
            ..complete_answers()
        };
        let fields: Vec<_> = validate_form(&answers)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["idade", "email", "telefone", "cep"]);
    }

    #[test]
    fn test_validate_form_skips_age_checks_when_absent() {
        let answers = FormAnswers {
            age: String::new(),
            ..complete_answers()
        };
        let errors = validate_form(&answers);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Idade é obrigatório.");
    }

    #[test]
    fn test_clear_field() {
        let mut errors = validate_required_fields(&FormAnswers::default());
        clear_field(&mut errors, "idade");
        assert!(error_for(&errors, "idade").is_none());
        assert_eq!(errors.len(), Field::REQUIRED.len() - 1);
    }
}
