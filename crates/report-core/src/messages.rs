//! User-facing messages shared by the validation engine and front ends

/// Report stored
pub const SUCCESS: &str = "Denúncia registrada com sucesso!";
/// Transport or configuration failure
pub const ERROR_GENERIC: &str = "Erro ao enviar denúncia. Tente novamente.";
/// Summary shown above inline field errors
pub const ERROR_VALIDATION: &str = "Por favor, corrija os erros no formulário.";
pub const ERROR_RATE_LIMIT: &str =
    "Você enviou muitas denúncias. Tente novamente em alguns minutos.";
pub const ERROR_AGE_MISMATCH: &str =
    "A idade informada não corresponde ao perfil selecionado. Por favor, corrija.";
pub const ERROR_ZERO_AGE: &str = "A idade não pode ser zero. Por favor, informe uma idade válida.";
pub const ERROR_INVALID_AGE: &str = "Idade inválida. Por favor, informe um número.";
pub const ERROR_INVALID_CATEGORY: &str = "Perfil inválido selecionado.";
pub const ERROR_EMAIL: &str = "Email inválido. Por favor, informe um email válido.";
pub const ERROR_PHONE: &str =
    "Telefone inválido. Por favor, informe um telefone válido (10 ou 11 dígitos).";
pub const ERROR_CEP: &str = "CEP inválido. Formato: 00000-000";
pub const WARNING_LOADING: &str = "Enviando denúncia...";

/// Questionnaire stored
pub const QUESTIONNAIRE_SUCCESS: &str =
    "Denúncia/Questionário enviado com sucesso! Agradecemos sua colaboração.";
/// No profile or section chosen, so there is no question set to answer
pub const ERROR_SECTION: &str =
    "Por favor, preencha a Seção 1 para selecionar o tipo de questionário a responder.";
pub const ERROR_AGE_LIMIT: &str = "Idade inválida. Informe um número entre 0 e 120.";
pub const ERROR_INVALID_OPTION: &str = "Resposta inválida. Escolha uma das opções oferecidas.";

/// Message for a missing required field
pub fn required(label: &str) -> String {
    format!("{} é obrigatório.", label)
}

/// Message for an age outside the category bounds
pub fn age_out_of_range(category: &str, min: i64, max: i64, age: i64) -> String {
    format!(
        "Para o perfil \"{}\", a idade deve estar entre {} e {} anos. Sua idade ({}) não corresponde. Por favor, corrija.",
        category, min, max, age
    )
}

/// Message for a throttled submission
pub fn rate_limited(wait_seconds: u64) -> String {
    format!("⏳ Aguarde {}s antes de enviar outra denúncia.", wait_seconds)
}

/// Questionnaire dispatch failure; the details are shown to the respondent
pub fn questionnaire_failed(details: &str) -> String {
    format!(
        "Erro ao enviar. Por favor, tente novamente. Detalhes: {}",
        details
    )
}
