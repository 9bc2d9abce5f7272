//! Awareness questionnaire
//!
//! A second, shorter answer set that shares the report form's profile
//! question. The selected profile routes the respondent to one of two
//! question sections; only that section's answers are required and only
//! they are stored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::Result;
use crate::form::RESPONDENT_TYPES;
use crate::messages;
use crate::validation::FieldError;

/// Profile value that asks for a free-text description and a chosen section
pub const OTHER_RESPONDENT: &str = "Outro";

/// Stored in place of a blank name
pub const ANONYMOUS_NAME: &str = "Anônimo";

/// Oldest age the questionnaire accepts
pub const MAX_AGE: u32 = 120;

/// Question section a respondent answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// Questions for children and adolescents
    #[serde(rename = "CA")]
    ChildAdolescent,
    /// Questions for parents and guardians
    #[serde(rename = "PR")]
    ParentGuardian,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::ChildAdolescent, Section::ParentGuardian];

    pub fn code(&self) -> &'static str {
        match self {
            Section::ChildAdolescent => "CA",
            Section::ParentGuardian => "PR",
        }
    }

    /// Label offered when the profile is "Outro"
    pub fn label(&self) -> &'static str {
        match self {
            Section::ChildAdolescent => "Criança/Adolescente",
            Section::ParentGuardian => "Pais/Responsáveis",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    /// Closed questions of this section, in display order
    pub fn questions(&self) -> &'static [QuestionnaireField] {
        use QuestionnaireField::*;

        match self {
            Section::ChildAdolescent => &[
                KnowsAbuse,
                ShamefulTouch,
                TouchSecret,
                TalksToAdult,
                UsesSocialMedia,
                UncomfortableMessage,
                KnowsWhoToTalkTo,
                TrustsAdults,
            ],
            Section::ParentGuardian => &[
                TalksBodyLimits,
                ChildSaysNo,
                MonitorsInternet,
                BehaviourChanges,
                KnowsWhereToSeekHelp,
                KnowsHotline,
            ],
        }
    }

    /// The section whose answers are discarded when this one is chosen
    pub fn other(&self) -> Section {
        match self {
            Section::ChildAdolescent => Section::ParentGuardian,
            Section::ParentGuardian => Section::ChildAdolescent,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A questionnaire field, addressed by its wire key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionnaireField {
    Name,
    Age,
    Respondent,
    RespondentOther,
    SectionOther,
    KnowsAbuse,
    ShamefulTouch,
    TouchSecret,
    TalksToAdult,
    UsesSocialMedia,
    UncomfortableMessage,
    KnowsWhoToTalkTo,
    TrustsAdults,
    TalksBodyLimits,
    ChildSaysNo,
    MonitorsInternet,
    BehaviourChanges,
    KnowsWhereToSeekHelp,
    KnowsHotline,
    Observation,
}

impl QuestionnaireField {
    pub const ALL: [QuestionnaireField; 20] = [
        QuestionnaireField::Name,
        QuestionnaireField::Age,
        QuestionnaireField::Respondent,
        QuestionnaireField::RespondentOther,
        QuestionnaireField::SectionOther,
        QuestionnaireField::KnowsAbuse,
        QuestionnaireField::ShamefulTouch,
        QuestionnaireField::TouchSecret,
        QuestionnaireField::TalksToAdult,
        QuestionnaireField::UsesSocialMedia,
        QuestionnaireField::UncomfortableMessage,
        QuestionnaireField::KnowsWhoToTalkTo,
        QuestionnaireField::TrustsAdults,
        QuestionnaireField::TalksBodyLimits,
        QuestionnaireField::ChildSaysNo,
        QuestionnaireField::MonitorsInternet,
        QuestionnaireField::BehaviourChanges,
        QuestionnaireField::KnowsWhereToSeekHelp,
        QuestionnaireField::KnowsHotline,
        QuestionnaireField::Observation,
    ];

    /// Wire key
    pub fn key(&self) -> &'static str {
        match self {
            QuestionnaireField::Name => "nome",
            QuestionnaireField::Age => "idade",
            QuestionnaireField::Respondent => "quemResponde",
            QuestionnaireField::RespondentOther => "quemRespondeOutro",
            QuestionnaireField::SectionOther => "secaoOutro",
            QuestionnaireField::KnowsAbuse => "sabeAbuso",
            QuestionnaireField::ShamefulTouch => "tocadoVergonha",
            QuestionnaireField::TouchSecret => "segredoToque",
            QuestionnaireField::TalksToAdult => "avontadeConversarAdulto",
            QuestionnaireField::UsesSocialMedia => "usaRedesSociais",
            QuestionnaireField::UncomfortableMessage => "mensagemDesconfortavel",
            QuestionnaireField::KnowsWhoToTalkTo => "sabeComQuemConversar",
            QuestionnaireField::TrustsAdults => "confiaProtecaoAdultos",
            QuestionnaireField::TalksBodyLimits => "conversaLimitesCorpo",
            QuestionnaireField::ChildSaysNo => "sabeDizerNao",
            QuestionnaireField::MonitorsInternet => "acompanhaInternet",
            QuestionnaireField::BehaviourChanges => "mudancasComportamento",
            QuestionnaireField::KnowsWhereToSeekHelp => "sabeQuemProcurar",
            QuestionnaireField::KnowsHotline => "conheceConselhoDisque100",
            QuestionnaireField::Observation => "observacao",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Short label used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            QuestionnaireField::Name => "Nome",
            QuestionnaireField::Age => "Idade",
            QuestionnaireField::Respondent => "Perfil",
            QuestionnaireField::RespondentOther => "Especificação do perfil",
            QuestionnaireField::SectionOther => "Foco do questionário",
            QuestionnaireField::KnowsAbuse => "Sabe o que é abuso",
            QuestionnaireField::ShamefulTouch => "Toque que causou vergonha ou medo",
            QuestionnaireField::TouchSecret => "Pedido de segredo",
            QuestionnaireField::TalksToAdult => "À vontade para conversar com um adulto",
            QuestionnaireField::UsesSocialMedia => "Uso de internet e redes sociais",
            QuestionnaireField::UncomfortableMessage => "Mensagem desconfortável",
            QuestionnaireField::KnowsWhoToTalkTo => "Sabe com quem conversar",
            QuestionnaireField::TrustsAdults => "Confia na proteção dos adultos",
            QuestionnaireField::TalksBodyLimits => "Conversa sobre limites do corpo",
            QuestionnaireField::ChildSaysNo => "Sabe dizer não",
            QuestionnaireField::MonitorsInternet => "Acompanha o uso da internet",
            QuestionnaireField::BehaviourChanges => "Mudanças de comportamento",
            QuestionnaireField::KnowsWhereToSeekHelp => "Sabe a quem procurar",
            QuestionnaireField::KnowsHotline => "Conhece o Conselho Tutelar ou Disque 100",
            QuestionnaireField::Observation => "Observação",
        }
    }

    /// Offered answers; empty for free-text fields
    pub fn options(&self) -> &'static [&'static str] {
        const YES_NO: &[&str] = &["Sim", "Não"];

        match self {
            QuestionnaireField::Name
            | QuestionnaireField::Age
            | QuestionnaireField::RespondentOther
            | QuestionnaireField::Observation => &[],
            QuestionnaireField::Respondent => &RESPONDENT_TYPES,
            QuestionnaireField::SectionOther => &["Criança/Adolescente", "Pais/Responsáveis"],
            QuestionnaireField::KnowsAbuse | QuestionnaireField::KnowsWhoToTalkTo => {
                &["Sim", "Mais ou menos", "Não"]
            }
            QuestionnaireField::ShamefulTouch => &["Sim", "Não", "Prefiro não responder"],
            QuestionnaireField::TalksToAdult | QuestionnaireField::TrustsAdults => {
                &["Sim", "Às vezes", "Não"]
            }
            QuestionnaireField::TouchSecret
            | QuestionnaireField::UsesSocialMedia
            | QuestionnaireField::UncomfortableMessage
            | QuestionnaireField::BehaviourChanges
            | QuestionnaireField::KnowsHotline => YES_NO,
            QuestionnaireField::TalksBodyLimits => &["Sim, com frequência", "Às vezes", "Não"],
            QuestionnaireField::ChildSaysNo => {
                &["Sim", "Acho que não", "Nunca conversamos sobre isso"]
            }
            QuestionnaireField::MonitorsInternet => &["Sempre", "Às vezes", "Raramente"],
            QuestionnaireField::KnowsWhereToSeekHelp => &["Sim", "Não", "Não tenho certeza"],
        }
    }
}

impl fmt::Display for QuestionnaireField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Answers to the awareness questionnaire
///
/// Every field is kept as the raw text the respondent chose or typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionnaireAnswers {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "idade")]
    pub age: String,
    #[serde(rename = "quemResponde")]
    pub respondent: String,
    #[serde(rename = "quemRespondeOutro")]
    pub respondent_other: String,
    #[serde(rename = "secaoOutro")]
    pub section_other: String,

    #[serde(rename = "sabeAbuso")]
    pub knows_abuse: String,
    #[serde(rename = "tocadoVergonha")]
    pub shameful_touch: String,
    #[serde(rename = "segredoToque")]
    pub touch_secret: String,
    #[serde(rename = "avontadeConversarAdulto")]
    pub talks_to_adult: String,
    #[serde(rename = "usaRedesSociais")]
    pub uses_social_media: String,
    #[serde(rename = "mensagemDesconfortavel")]
    pub uncomfortable_message: String,
    #[serde(rename = "sabeComQuemConversar")]
    pub knows_who_to_talk_to: String,
    #[serde(rename = "confiaProtecaoAdultos")]
    pub trusts_adults: String,

    #[serde(rename = "conversaLimitesCorpo")]
    pub talks_body_limits: String,
    #[serde(rename = "sabeDizerNao")]
    pub child_says_no: String,
    #[serde(rename = "acompanhaInternet")]
    pub monitors_internet: String,
    #[serde(rename = "mudancasComportamento")]
    pub behaviour_changes: String,
    #[serde(rename = "sabeQuemProcurar")]
    pub knows_where_to_seek_help: String,
    #[serde(rename = "conheceConselhoDisque100")]
    pub knows_hotline: String,

    #[serde(rename = "observacao")]
    pub observation: String,
}

impl QuestionnaireAnswers {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn value(&self, field: QuestionnaireField) -> &str {
        match field {
            QuestionnaireField::Name => &self.name,
            QuestionnaireField::Age => &self.age,
            QuestionnaireField::Respondent => &self.respondent,
            QuestionnaireField::RespondentOther => &self.respondent_other,
            QuestionnaireField::SectionOther => &self.section_other,
            QuestionnaireField::KnowsAbuse => &self.knows_abuse,
            QuestionnaireField::ShamefulTouch => &self.shameful_touch,
            QuestionnaireField::TouchSecret => &self.touch_secret,
            QuestionnaireField::TalksToAdult => &self.talks_to_adult,
            QuestionnaireField::UsesSocialMedia => &self.uses_social_media,
            QuestionnaireField::UncomfortableMessage => &self.uncomfortable_message,
            QuestionnaireField::KnowsWhoToTalkTo => &self.knows_who_to_talk_to,
            QuestionnaireField::TrustsAdults => &self.trusts_adults,
            QuestionnaireField::TalksBodyLimits => &self.talks_body_limits,
            QuestionnaireField::ChildSaysNo => &self.child_says_no,
            QuestionnaireField::MonitorsInternet => &self.monitors_internet,
            QuestionnaireField::BehaviourChanges => &self.behaviour_changes,
            QuestionnaireField::KnowsWhereToSeekHelp => &self.knows_where_to_seek_help,
            QuestionnaireField::KnowsHotline => &self.knows_hotline,
            QuestionnaireField::Observation => &self.observation,
        }
    }

    fn value_mut(&mut self, field: QuestionnaireField) -> &mut String {
        match field {
            QuestionnaireField::Name => &mut self.name,
            QuestionnaireField::Age => &mut self.age,
            QuestionnaireField::Respondent => &mut self.respondent,
            QuestionnaireField::RespondentOther => &mut self.respondent_other,
            QuestionnaireField::SectionOther => &mut self.section_other,
            QuestionnaireField::KnowsAbuse => &mut self.knows_abuse,
            QuestionnaireField::ShamefulTouch => &mut self.shameful_touch,
            QuestionnaireField::TouchSecret => &mut self.touch_secret,
            QuestionnaireField::TalksToAdult => &mut self.talks_to_adult,
            QuestionnaireField::UsesSocialMedia => &mut self.uses_social_media,
            QuestionnaireField::UncomfortableMessage => &mut self.uncomfortable_message,
            QuestionnaireField::KnowsWhoToTalkTo => &mut self.knows_who_to_talk_to,
            QuestionnaireField::TrustsAdults => &mut self.trusts_adults,
            QuestionnaireField::TalksBodyLimits => &mut self.talks_body_limits,
            QuestionnaireField::ChildSaysNo => &mut self.child_says_no,
            QuestionnaireField::MonitorsInternet => &mut self.monitors_internet,
            QuestionnaireField::BehaviourChanges => &mut self.behaviour_changes,
            QuestionnaireField::KnowsWhereToSeekHelp => &mut self.knows_where_to_seek_help,
            QuestionnaireField::KnowsHotline => &mut self.knows_hotline,
            QuestionnaireField::Observation => &mut self.observation,
        }
    }

    /// Mutably borrow every field, in [`QuestionnaireField::ALL`] order
    pub fn text_fields_mut(&mut self) -> [&mut String; 20] {
        [
            &mut self.name,
            &mut self.age,
            &mut self.respondent,
            &mut self.respondent_other,
            &mut self.section_other,
            &mut self.knows_abuse,
            &mut self.shameful_touch,
            &mut self.touch_secret,
            &mut self.talks_to_adult,
            &mut self.uses_social_media,
            &mut self.uncomfortable_message,
            &mut self.knows_who_to_talk_to,
            &mut self.trusts_adults,
            &mut self.talks_body_limits,
            &mut self.child_says_no,
            &mut self.monitors_internet,
            &mut self.behaviour_changes,
            &mut self.knows_where_to_seek_help,
            &mut self.knows_hotline,
            &mut self.observation,
        ]
    }

    /// Store an answer the way the interactive form does
    ///
    /// Age input keeps only its digits and is refused above [`MAX_AGE`].
    /// Moving the profile away from "Outro" clears the two fields that only
    /// make sense for it. Returns whether the value was taken.
    pub fn set_answer(&mut self, field: QuestionnaireField, value: &str) -> bool {
        if field == QuestionnaireField::Age {
            return match normalize_age(value) {
                Some(age) => {
                    self.age = age;
                    true
                }
                None => false,
            };
        }

        *self.value_mut(field) = value.to_string();
        if field == QuestionnaireField::Respondent && value != OTHER_RESPONDENT {
            self.respondent_other.clear();
            self.section_other.clear();
        }
        true
    }

    /// Section the chosen profile leads to
    pub fn target_section(&self) -> Option<Section> {
        match self.respondent.as_str() {
            "Criança" | "Adolescente" => Some(Section::ChildAdolescent),
            "Mãe/Pai ou responsável" => Some(Section::ParentGuardian),
            OTHER_RESPONDENT => Section::from_label(&self.section_other),
            _ => None,
        }
    }

    /// Fields that must be answered before sending
    pub fn required_fields(&self) -> Vec<QuestionnaireField> {
        let mut fields = Vec::new();
        if let Some(section) = self.target_section() {
            fields.push(QuestionnaireField::Age);
            fields.push(QuestionnaireField::Respondent);
            fields.extend_from_slice(section.questions());
        }
        if self.respondent == OTHER_RESPONDENT {
            fields.push(QuestionnaireField::RespondentOther);
            fields.push(QuestionnaireField::SectionOther);
        }
        fields
    }

    /// Share of required fields answered, rounded to a whole percent
    pub fn progress_percentage(&self) -> u8 {
        let required = self.required_fields();
        if required.is_empty() {
            return 0;
        }

        let answered = required
            .iter()
            .filter(|f| !self.value(**f).trim().is_empty())
            .count();
        ((answered as f64 / required.len() as f64) * 100.0).round() as u8
    }

    /// Fields as stored: the name becomes `nomeAnonimo` and the section not
    /// taken is left out
    pub fn document_fields(&self) -> Map<String, Value> {
        let skipped = self.target_section().map(|s| s.other().questions());
        let mut fields = Map::new();

        for field in QuestionnaireField::ALL {
            if field == QuestionnaireField::Name
                || skipped.map_or(false, |skip| skip.contains(&field))
            {
                continue;
            }
            fields.insert(
                field.key().to_string(),
                Value::String(self.value(field).to_string()),
            );
        }

        let name = self.name.trim();
        let name = if name.is_empty() { ANONYMOUS_NAME } else { name };
        fields.insert("nomeAnonimo".to_string(), Value::String(name.to_string()));
        fields
    }
}

/// Digits of an age input, or `None` when the age is out of range
///
/// Anything that is not an ASCII digit is dropped. Blank input stays blank.
pub fn normalize_age(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Some(digits);
    }
    match digits.parse::<u32>() {
        Ok(age) if age <= MAX_AGE => Some(digits),
        _ => None,
    }
}

/// The profile or section choice is missing
pub fn validate_section(answers: &QuestionnaireAnswers) -> Vec<FieldError> {
    if answers.target_section().is_some() {
        return Vec::new();
    }

    if answers.respondent.trim().is_empty() {
        vec![FieldError::new(
            QuestionnaireField::Respondent.key(),
            messages::ERROR_SECTION,
        )]
    } else if answers.respondent == OTHER_RESPONDENT && answers.section_other.trim().is_empty() {
        vec![FieldError::new(
            QuestionnaireField::SectionOther.key(),
            messages::ERROR_SECTION,
        )]
    } else {
        // unknown values are reported by the option check
        Vec::new()
    }
}

/// Required fields of the chosen section left blank
pub fn validate_section_required(answers: &QuestionnaireAnswers) -> Vec<FieldError> {
    if answers.target_section().is_none() {
        return Vec::new();
    }

    answers
        .required_fields()
        .into_iter()
        .filter(|f| answers.value(*f).trim().is_empty())
        .map(|f| FieldError::new(f.key(), messages::required(f.label())))
        .collect()
}

/// Age must be plain digits no larger than [`MAX_AGE`]
pub fn validate_questionnaire_age(answers: &QuestionnaireAnswers) -> Option<FieldError> {
    let age = answers.age.as_str();
    if age.is_empty() || normalize_age(age).as_deref() == Some(age) {
        return None;
    }
    Some(FieldError::new(
        QuestionnaireField::Age.key(),
        messages::ERROR_AGE_LIMIT,
    ))
}

/// Closed questions must hold one of their offered answers
pub fn validate_options(answers: &QuestionnaireAnswers) -> Vec<FieldError> {
    QuestionnaireField::ALL
        .into_iter()
        .filter(|f| {
            let value = answers.value(*f);
            !f.options().is_empty() && !value.is_empty() && !f.options().contains(&value)
        })
        .map(|f| FieldError::new(f.key(), messages::ERROR_INVALID_OPTION))
        .collect()
}

/// Run every questionnaire check, in a fixed order
pub fn validate_questionnaire(answers: &QuestionnaireAnswers) -> Vec<FieldError> {
    let mut errors = validate_section(answers);
    errors.extend(validate_section_required(answers));
    errors.extend(validate_questionnaire_age(answers));
    errors.extend(validate_options(answers));
    errors
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn child_answers() -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            name: "Bia".to_string(),
            age: "10".to_string(),
            respondent: "Criança".to_string(),
            knows_abuse: "Sim".to_string(),
            shameful_touch: "Não".to_string(),
            touch_secret: "Não".to_string(),
            talks_to_adult: "Às vezes".to_string(),
            uses_social_media: "Sim".to_string(),
            uncomfortable_message: "Não".to_string(),
            knows_who_to_talk_to: "Mais ou menos".to_string(),
            trusts_adults: "Sim".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_target_section() {
        let mut answers = QuestionnaireAnswers::default();
        assert_eq!(answers.target_section(), None);

        answers.respondent = "Adolescente".to_string();
        assert_eq!(answers.target_section(), Some(Section::ChildAdolescent));

        answers.respondent = "Mãe/Pai ou responsável".to_string();
        assert_eq!(answers.target_section(), Some(Section::ParentGuardian));

        answers.respondent = "Outro".to_string();
        assert_eq!(answers.target_section(), None);
        answers.section_other = "Pais/Responsáveis".to_string();
        assert_eq!(answers.target_section(), Some(Section::ParentGuardian));

        answers.respondent = "Vizinho".to_string();
        assert_eq!(answers.target_section(), None);
    }

    #[test]
    fn test_required_fields_follow_section() {
        let child = child_answers();
        assert_eq!(child.required_fields().len(), 10);
        assert!(child
            .required_fields()
            .contains(&QuestionnaireField::TrustsAdults));

        let guardian = QuestionnaireAnswers {
            respondent: "Mãe/Pai ou responsável".to_string(),
            ..Default::default()
        };
        assert_eq!(guardian.required_fields().len(), 8);
        assert!(!guardian
            .required_fields()
            .contains(&QuestionnaireField::KnowsAbuse));

        let other = QuestionnaireAnswers {
            respondent: "Outro".to_string(),
            section_other: "Criança/Adolescente".to_string(),
            ..Default::default()
        };
        let fields = other.required_fields();
        assert_eq!(fields.len(), 12);
        assert!(fields.contains(&QuestionnaireField::RespondentOther));
    }

    #[test]
    fn test_required_fields_do_not_accumulate() {
        let other = QuestionnaireAnswers {
            respondent: "Outro".to_string(),
            section_other: "Criança/Adolescente".to_string(),
            ..Default::default()
        };
        for _ in 0..3 {
            let _ = other.required_fields();
        }
        assert_eq!(child_answers().required_fields().len(), 10);
    }

    #[test]
    fn test_progress_percentage() {
        assert_eq!(QuestionnaireAnswers::default().progress_percentage(), 0);
        assert_eq!(child_answers().progress_percentage(), 100);

        let mut answers = child_answers();
        answers.knows_abuse.clear();
        answers.trusts_adults = "   ".to_string();
        // 8 of 10
        assert_eq!(answers.progress_percentage(), 80);

        let partial = QuestionnaireAnswers {
            respondent: "Mãe/Pai ou responsável".to_string(),
            age: "40".to_string(),
            talks_body_limits: "Às vezes".to_string(),
            ..Default::default()
        };
        // 3 of 8 rounds up from 37.5
        assert_eq!(partial.progress_percentage(), 38);
    }

    #[test]
    fn test_set_answer_age_input() {
        let mut answers = QuestionnaireAnswers::default();
        assert!(answers.set_answer(QuestionnaireField::Age, "1a2"));
        assert_eq!(answers.age, "12");

        assert!(!answers.set_answer(QuestionnaireField::Age, "121"));
        assert_eq!(answers.age, "12");

        assert!(answers.set_answer(QuestionnaireField::Age, "120"));
        assert!(answers.set_answer(QuestionnaireField::Age, ""));
        assert_eq!(answers.age, "");
    }

    #[test]
    fn test_leaving_other_clears_its_fields() {
        let mut answers = QuestionnaireAnswers::default();
        answers.set_answer(QuestionnaireField::Respondent, "Outro");
        answers.set_answer(QuestionnaireField::RespondentOther, "Professora");
        answers.set_answer(QuestionnaireField::SectionOther, "Pais/Responsáveis");
        assert_eq!(answers.target_section(), Some(Section::ParentGuardian));

        answers.set_answer(QuestionnaireField::Respondent, "Criança");
        assert!(answers.respondent_other.is_empty());
        assert!(answers.section_other.is_empty());
        assert_eq!(answers.target_section(), Some(Section::ChildAdolescent));
    }

    #[test]
    fn test_document_fields() {
        let mut answers = child_answers();
        answers.talks_body_limits = "Não".to_string();
        let fields = answers.document_fields();

        assert!(!fields.contains_key("nome"));
        assert_eq!(fields["nomeAnonimo"], "Bia");
        assert_eq!(fields["sabeAbuso"], "Sim");
        assert!(!fields.contains_key("conversaLimitesCorpo"));
        assert!(fields.contains_key("observacao"));

        answers.name = "  ".to_string();
        assert_eq!(answers.document_fields()["nomeAnonimo"], ANONYMOUS_NAME);
    }

    #[test]
    fn test_validate_section() {
        let errors = validate_questionnaire(&QuestionnaireAnswers::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "quemResponde");
        assert_eq!(errors[0].message, messages::ERROR_SECTION);

        let other = QuestionnaireAnswers {
            respondent: "Outro".to_string(),
            ..Default::default()
        };
        let errors = validate_section(&other);
        assert_eq!(errors[0].field, "secaoOutro");
    }

    #[test]
    fn test_validate_questionnaire() {
        assert!(validate_questionnaire(&child_answers()).is_empty());

        let answers = QuestionnaireAnswers {
            age: "9 anos".to_string(),
            knows_abuse: "Talvez".to_string(),
            touch_secret: String::new(),
            ..child_answers()
        };
        let errors = validate_questionnaire(&answers);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["segredoToque", "idade", "sabeAbuso"]);
        assert_eq!(errors[0].message, "Pedido de segredo é obrigatório.");
        assert_eq!(errors[2].message, messages::ERROR_INVALID_OPTION);
    }

    #[test]
    fn test_unknown_profile_is_an_option_error() {
        let answers = QuestionnaireAnswers {
            respondent: "Vizinho".to_string(),
            ..Default::default()
        };
        let errors = validate_questionnaire(&answers);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "quemResponde");
        assert_eq!(errors[0].message, messages::ERROR_INVALID_OPTION);
    }

    #[test]
    fn test_from_json() {
        let answers = QuestionnaireAnswers::from_json(
            r#"{"quemResponde": "Outro", "secaoOutro": "Criança/Adolescente", "sabeAbuso": "Não"}"#,
        )
        .unwrap();
        assert_eq!(answers.target_section(), Some(Section::ChildAdolescent));
        assert_eq!(answers.knows_abuse, "Não");
        assert!(answers.name.is_empty());
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in QuestionnaireField::ALL {
            assert_eq!(QuestionnaireField::from_key(field.key()), Some(field));
        }
        assert_eq!(Section::from_label("Pais/Responsáveis"), Some(Section::ParentGuardian));
        assert_eq!(Section::ChildAdolescent.code(), "CA");
    }
}
