//! Report Core
//!
//! Answer-set model and validation for confidential child-protection
//! reports.
//!
//! ## Architecture
//!
//! 1. **Form** (`form`): the typed [`FormAnswers`] record, field keys and
//!    labels, and the respondent-category age table.
//!
//! 2. **Validation** (`validation`): pure check functions returning
//!    [`FieldError`] data, plus [`validate_form`] which runs them all.
//!
//! 3. **Engine** (`engine`): rule framework over the same checks, with
//!    per-rule and per-category bookkeeping.
//!
//! 4. **Questionnaire** (`questionnaire`): the awareness questionnaire,
//!    its section routing, progress and checks.
//!
//! 5. **Messages** (`messages`): user-facing text.
//!
//! ## Example
//!
//! ```rust
//! use report_core::{FormAnswers, ValidationEngine};
//!
//! let answers = FormAnswers {
//!     respondent: "Criança".to_string(),
//!     age: "15".to_string(),
//!     ..Default::default()
//! };
//!
//! let report = ValidationEngine::new().validate(&answers);
//! assert!(!report.is_valid);
//! assert!(report.errors.iter().any(|e| e.field == "idade"));
//! ```

pub mod engine;
pub mod error;
pub mod form;
pub mod messages;
pub mod questionnaire;
pub mod validation;

pub use engine::rules::{Rule, RuleCategory};
pub use engine::{CategorySummary, ValidationEngine, ValidationReport};
pub use error::{CoreError, Result};
pub use form::{
    field_label, AgeRange, Field, FieldValue, FormAnswers, RespondentCategory, GENDERS,
    REPORT_CATEGORIES, RESPONDENT_TYPES,
};
pub use questionnaire::{
    normalize_age, validate_questionnaire, QuestionnaireAnswers, QuestionnaireField, Section,
};
pub use validation::{
    clear_field, error_for, parse_age, validate_age_vs_category, validate_cep, validate_email,
    validate_form, validate_phone, validate_required_fields, validate_zero_age, FieldError,
};
