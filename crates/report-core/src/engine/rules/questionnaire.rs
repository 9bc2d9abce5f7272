//! Questionnaire rules
//!
//! Section routing decides which questions are required, so these rules
//! only look at the section the profile leads to.

use super::{Rule, RuleCategory};
use crate::questionnaire::{
    validate_options, validate_questionnaire_age, validate_section, validate_section_required,
    QuestionnaireAnswers,
};
use crate::validation::FieldError;

/// A profile, and for "Outro" a section, must be chosen
pub struct SectionSelectedRule;

impl Rule<QuestionnaireAnswers> for SectionSelectedRule {
    fn id(&self) -> &str {
        "section-selected"
    }

    fn name(&self) -> &str {
        "Section selected"
    }

    fn description(&self) -> &str {
        "Validates that the profile leads to a question section"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Required
    }

    fn is_applicable(&self, answers: &QuestionnaireAnswers) -> bool {
        answers.target_section().is_none()
    }

    fn evaluate(&self, answers: &QuestionnaireAnswers) -> Vec<FieldError> {
        validate_section(answers)
    }
}

/// Every question of the chosen section is answered
pub struct SectionRequiredRule;

impl Rule<QuestionnaireAnswers> for SectionRequiredRule {
    fn id(&self) -> &str {
        "section-required"
    }

    fn name(&self) -> &str {
        "Section required fields"
    }

    fn description(&self) -> &str {
        "Validates that the chosen section's questions, age and profile are filled"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Required
    }

    fn is_applicable(&self, answers: &QuestionnaireAnswers) -> bool {
        answers.target_section().is_some()
    }

    fn evaluate(&self, answers: &QuestionnaireAnswers) -> Vec<FieldError> {
        validate_section_required(answers)
    }
}

pub struct QuestionnaireAgeRule;

impl Rule<QuestionnaireAnswers> for QuestionnaireAgeRule {
    fn id(&self) -> &str {
        "questionnaire-age"
    }

    fn name(&self) -> &str {
        "Questionnaire age"
    }

    fn description(&self) -> &str {
        "Validates that the age is a whole number between 0 and 120"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Age
    }

    fn is_applicable(&self, answers: &QuestionnaireAnswers) -> bool {
        !answers.age.is_empty()
    }

    fn evaluate(&self, answers: &QuestionnaireAnswers) -> Vec<FieldError> {
        validate_questionnaire_age(answers).into_iter().collect()
    }
}

/// Closed questions hold one of their offered answers
pub struct AnswerOptionsRule;

impl Rule<QuestionnaireAnswers> for AnswerOptionsRule {
    fn id(&self) -> &str {
        "answer-options"
    }

    fn name(&self) -> &str {
        "Answer options"
    }

    fn description(&self) -> &str {
        "Validates that every closed question holds one of the offered answers"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Options
    }

    fn evaluate(&self, answers: &QuestionnaireAnswers) -> Vec<FieldError> {
        validate_options(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages;
    use crate::questionnaire::tests::child_answers;

    #[test]
    fn test_section_rules_are_exclusive() {
        let blank = QuestionnaireAnswers::default();
        assert!(SectionSelectedRule.is_applicable(&blank));
        assert!(!SectionRequiredRule.is_applicable(&blank));

        let child = child_answers();
        assert!(!SectionSelectedRule.is_applicable(&child));
        assert!(SectionRequiredRule.is_applicable(&child));
        assert!(SectionRequiredRule.evaluate(&child).is_empty());
    }

    #[test]
    fn test_section_required_ignores_other_section() {
        let answers = QuestionnaireAnswers {
            knows_hotline: String::new(),
            ..child_answers()
        };
        assert!(SectionRequiredRule.evaluate(&answers).is_empty());

        let guardian = QuestionnaireAnswers {
            respondent: "Mãe/Pai ou responsável".to_string(),
            ..child_answers()
        };
        let errors = SectionRequiredRule.evaluate(&guardian);
        assert_eq!(errors.len(), 6);
        assert_eq!(errors[0].field, "conversaLimitesCorpo");
    }

    #[test]
    fn test_age_rule() {
        let mut answers = child_answers();
        assert!(QuestionnaireAgeRule.evaluate(&answers).is_empty());

        answers.age = "0".to_string();
        assert!(QuestionnaireAgeRule.evaluate(&answers).is_empty());

        answers.age = "121".to_string();
        let errors = QuestionnaireAgeRule.evaluate(&answers);
        assert_eq!(errors[0].message, messages::ERROR_AGE_LIMIT);

        answers.age = "-3".to_string();
        assert_eq!(QuestionnaireAgeRule.evaluate(&answers).len(), 1);
    }

    #[test]
    fn test_options_rule() {
        let answers = QuestionnaireAnswers {
            monitors_internet: "Nunca".to_string(),
            ..child_answers()
        };
        let errors = AnswerOptionsRule.evaluate(&answers);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "acompanhaInternet");
        assert_eq!(AnswerOptionsRule.category(), RuleCategory::Options);
    }
}
