//! Answer-set model
//!
//! [`FormAnswers`] is the typed record behind one report. Every field is
//! declared here so a renamed or missing field fails at build time rather
//! than at submission. The serialized form uses the camelCase keys the
//! remote endpoint expects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// One in-progress or submitted report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormAnswers {
    /// Who is filling out the form (see [`RespondentCategory`])
    #[serde(rename = "quemResponde")]
    pub respondent: String,
    /// Respondent age, as typed
    #[serde(rename = "idade")]
    pub age: String,
    /// Respondent name (optional)
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "nomeCrianca")]
    pub child_name: String,
    #[serde(rename = "idadeCrianca")]
    pub child_age: String,
    #[serde(rename = "genero")]
    pub gender: String,

    #[serde(rename = "local")]
    pub place: String,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento")]
    pub complement: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "cidade")]
    pub city: String,
    /// Brazilian postal code (CEP), optional
    #[serde(rename = "cep")]
    pub postal_code: String,

    /// Report category (see [`REPORT_CATEGORIES`])
    #[serde(rename = "categoria")]
    pub report_category: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "descricaoAcoes")]
    pub actions_description: String,

    #[serde(rename = "nomeSuspeito")]
    pub suspect_name: String,
    #[serde(rename = "relacao")]
    pub relation: String,

    /// Contact phone, optional
    #[serde(rename = "telefone")]
    pub phone: String,
    /// Contact email, optional
    #[serde(rename = "email")]
    pub email: String,

    /// Respondent confirms the report is truthful
    #[serde(rename = "consentimento")]
    pub consent: bool,
    /// Respondent accepted the privacy policy
    #[serde(rename = "politicaPrivacidade")]
    pub privacy_policy: bool,
}

impl FormAnswers {
    /// Decode an answer set from JSON
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Borrow the value of a field
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        use FieldValue::{Flag, Text};

        match field {
            Field::Respondent => Text(&self.respondent),
            Field::Age => Text(&self.age),
            Field::Name => Text(&self.name),
            Field::ChildName => Text(&self.child_name),
            Field::ChildAge => Text(&self.child_age),
            Field::Gender => Text(&self.gender),
            Field::Place => Text(&self.place),
            Field::Street => Text(&self.street),
            Field::Number => Text(&self.number),
            Field::Complement => Text(&self.complement),
            Field::District => Text(&self.district),
            Field::City => Text(&self.city),
            Field::PostalCode => Text(&self.postal_code),
            Field::ReportCategory => Text(&self.report_category),
            Field::Description => Text(&self.description),
            Field::ActionsDescription => Text(&self.actions_description),
            Field::SuspectName => Text(&self.suspect_name),
            Field::Relation => Text(&self.relation),
            Field::Phone => Text(&self.phone),
            Field::Email => Text(&self.email),
            Field::Consent => Flag(self.consent),
            Field::PrivacyPolicy => Flag(self.privacy_policy),
        }
    }

    /// Mutably borrow every free-text field
    pub fn text_fields_mut(&mut self) -> [&mut String; 20] {
        [
            &mut self.respondent,
            &mut self.age,
            &mut self.name,
            &mut self.child_name,
            &mut self.child_age,
            &mut self.gender,
            &mut self.place,
            &mut self.street,
            &mut self.number,
            &mut self.complement,
            &mut self.district,
            &mut self.city,
            &mut self.postal_code,
            &mut self.report_category,
            &mut self.description,
            &mut self.actions_description,
            &mut self.suspect_name,
            &mut self.relation,
            &mut self.phone,
            &mut self.email,
        ]
    }

    /// Resolve the respondent label against the age range table
    pub fn respondent_category(&self) -> Result<RespondentCategory> {
        self.respondent.parse()
    }
}

/// Borrowed field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Flag(bool),
}

impl FieldValue<'_> {
    /// Blank text or an unchecked box
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(b) => !b,
        }
    }
}

/// Every field of [`FormAnswers`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Respondent,
    Age,
    Name,
    ChildName,
    ChildAge,
    Gender,
    Place,
    Street,
    Number,
    Complement,
    District,
    City,
    PostalCode,
    ReportCategory,
    Description,
    ActionsDescription,
    SuspectName,
    Relation,
    Phone,
    Email,
    Consent,
    PrivacyPolicy,
}

impl Field {
    /// Fields that must be filled before a report can be sent
    pub const REQUIRED: [Field; 9] = [
        Field::Respondent,
        Field::Age,
        Field::ChildName,
        Field::ChildAge,
        Field::Gender,
        Field::ReportCategory,
        Field::Description,
        Field::Consent,
        Field::PrivacyPolicy,
    ];

    /// Wire key, as used in serialized answers and in field errors
    pub fn key(&self) -> &'static str {
        match self {
            Field::Respondent => "quemResponde",
            Field::Age => "idade",
            Field::Name => "nome",
            Field::ChildName => "nomeCrianca",
            Field::ChildAge => "idadeCrianca",
            Field::Gender => "genero",
            Field::Place => "local",
            Field::Street => "logradouro",
            Field::Number => "numero",
            Field::Complement => "complemento",
            Field::District => "bairro",
            Field::City => "cidade",
            Field::PostalCode => "cep",
            Field::ReportCategory => "categoria",
            Field::Description => "descricao",
            Field::ActionsDescription => "descricaoAcoes",
            Field::SuspectName => "nomeSuspeito",
            Field::Relation => "relacao",
            Field::Phone => "telefone",
            Field::Email => "email",
            Field::Consent => "consentimento",
            Field::PrivacyPolicy => "politicaPrivacidade",
        }
    }

    /// Human label shown next to the field
    pub fn label(&self) -> &'static str {
        field_label(self.key())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Human label for a wire key; unknown keys come back unchanged
pub fn field_label(key: &str) -> &str {
    match key {
        "quemResponde" => "Perfil",
        "idade" => "Idade",
        "nomeCrianca" => "Nome da criança",
        "idadeCrianca" => "Idade da criança",
        "genero" => "Gênero",
        "categoria" => "Categoria de denúncia",
        "descricao" => "Descrição",
        "consentimento" => "Confirmação",
        "politicaPrivacidade" => "Política de Privacidade",
        other => other,
    }
}

/// Inclusive age bounds for a respondent category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: i64,
    pub max: i64,
}

impl AgeRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, age: i64) -> bool {
        age >= self.min && age <= self.max
    }
}

/// Self-identified role of whoever fills out the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RespondentCategory {
    #[serde(rename = "Criança")]
    Child,
    #[serde(rename = "Adolescente")]
    Adolescent,
    #[serde(rename = "Mãe/Pai ou responsável")]
    Guardian,
    #[serde(rename = "Outro")]
    Other,
}

impl RespondentCategory {
    /// All categories, in the order the form lists them
    pub const ALL: [RespondentCategory; 4] = [
        RespondentCategory::Child,
        RespondentCategory::Adolescent,
        RespondentCategory::Guardian,
        RespondentCategory::Other,
    ];

    /// Label as it appears in the form and in stored answers
    pub fn label(&self) -> &'static str {
        match self {
            RespondentCategory::Child => "Criança",
            RespondentCategory::Adolescent => "Adolescente",
            RespondentCategory::Guardian => "Mãe/Pai ou responsável",
            RespondentCategory::Other => "Outro",
        }
    }

    /// Accepted respondent age for this category
    pub fn age_range(&self) -> AgeRange {
        match self {
            RespondentCategory::Child => AgeRange::new(3, 12),
            RespondentCategory::Adolescent => AgeRange::new(13, 17),
            RespondentCategory::Guardian => AgeRange::new(18, 100),
            RespondentCategory::Other => AgeRange::new(0, 150),
        }
    }
}

impl fmt::Display for RespondentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RespondentCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        RespondentCategory::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| CoreError::unknown_category(s))
    }
}

/// Respondent labels offered by the form
pub const RESPONDENT_TYPES: [&str; 4] = [
    "Criança",
    "Adolescente",
    "Mãe/Pai ou responsável",
    "Outro",
];

/// Report categories offered by the form
pub const REPORT_CATEGORIES: [&str; 7] = [
    "Abuso físico",
    "Abuso sexual",
    "Negligência",
    "Abuso emocional",
    "Exploração",
    "Trabalho infantil",
    "Outro",
];

/// Gender options for the child
pub const GENDERS: [&str; 3] = ["Masculino", "Feminino", "Outro"];
