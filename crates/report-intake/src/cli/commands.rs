//! CLI command definitions for the intake client
//!
//! Clap-based commands for checking an answer file, submitting it through the
//! throttled workflow, and inspecting or resetting local throttle state.
//! Questionnaires have their own command.

use clap::{Parser, Subcommand};
use report_core::{FormAnswers, QuestionnaireAnswers, ValidationEngine};
use report_security::{FileStore, SubmissionGuard};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::output::{
    OutputFormat, QuestionnaireOutput, Render, StatusOutput, SubmissionOutput, ValidationOutput,
};
use super::ExitCode;
use crate::client::{DocumentStoreClient, ReportSink, SheetsClient};
use crate::config::{Backend, IntakeConfig};
use crate::error::{IntakeError, Result};
use crate::identity::{identity_from, IdentityProvider};
use crate::submit::{QuestionnaireWorkflow, SubmissionWorkflow, SubmitOutcome};

/// Report intake CLI
///
/// Validate report answers, submit them to the configured endpoint, and
/// manage the local submission throttle.
#[derive(Parser, Debug)]
#[command(name = "report-intake")]
#[command(about = "Report intake - validate and submit confidential reports", long_about = None)]
#[command(version)]
pub struct IntakeCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for local throttle state (overrides configuration)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: IntakeCommands,
}

/// Available intake commands
#[derive(Subcommand, Debug)]
pub enum IntakeCommands {
    /// Validate an answer file without sending it
    Validate {
        /// Path to the JSON answer file
        #[arg(short, long)]
        answers: PathBuf,
    },

    /// Validate and submit an answer file
    ///
    /// Throttled per user: at most the configured number of reports within
    /// the configured window.
    Submit {
        /// Path to the JSON answer file
        #[arg(short, long)]
        answers: PathBuf,

        /// Identity-provider user id (anonymous when omitted)
        #[arg(short, long)]
        user_id: Option<String>,
    },

    /// Show the throttle state for a user
    Status {
        /// Identity-provider user id (anonymous when omitted)
        #[arg(short, long)]
        user_id: Option<String>,
    },

    /// Forget the stored submissions for a user
    Clear {
        /// Identity-provider user id (anonymous when omitted)
        #[arg(short, long)]
        user_id: Option<String>,
    },

    /// Check an awareness questionnaire and show its progress
    ///
    /// With --submit, complete answers are added to the document store.
    /// Questionnaires are not throttled.
    Questionnaire {
        /// Path to the JSON questionnaire file
        #[arg(short, long)]
        answers: PathBuf,

        /// Identity-provider user id (anonymous when omitted)
        #[arg(short, long)]
        user_id: Option<String>,

        /// Send the answers when they are complete
        #[arg(long)]
        submit: bool,
    },
}

/// Shared settings resolved from the global flags
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: IntakeConfig,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl CommandContext {
    /// Load configuration and apply command-line overrides
    pub fn from_cli(cli: &IntakeCli) -> Result<Self> {
        let mut config = IntakeConfig::load(cli.config.as_deref())?;
        if let Some(dir) = &cli.state_dir {
            config.state_dir = dir.clone();
        }
        Ok(Self {
            config,
            format: cli.format,
            quiet: cli.quiet,
        })
    }

    fn emit(&self, output: &impl Render) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        output.render(self.format)
    }

    fn guard(&self) -> Result<SubmissionGuard<FileStore>> {
        let store = FileStore::open(&self.config.state_dir)?;
        Ok(SubmissionGuard::new(store, self.config.rate_limit))
    }
}

fn read_answers_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        IntakeError::file_error(format!(
            "Failed to read answers file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Read and parse a JSON answer file
pub fn load_answers(path: &Path) -> Result<FormAnswers> {
    let content = read_answers_file(path)?;

    FormAnswers::from_json(&content).map_err(|e| {
        IntakeError::invalid_input(format!(
            "Answers file '{}' is not a valid answer set: {}",
            path.display(),
            e
        ))
    })
}

/// Read and parse a JSON questionnaire file
pub fn load_questionnaire(path: &Path) -> Result<QuestionnaireAnswers> {
    let content = read_answers_file(path)?;

    QuestionnaireAnswers::from_json(&content).map_err(|e| {
        IntakeError::invalid_input(format!(
            "Questionnaire file '{}' is not a valid answer set: {}",
            path.display(),
            e
        ))
    })
}

/// Execute the validate command
pub fn execute_validate(ctx: &CommandContext, answers: &Path) -> Result<ExitCode> {
    let answers = load_answers(answers)?;
    let report = ValidationEngine::new().validate(&answers);

    ctx.emit(&ValidationOutput::from_report(&report))?;

    Ok(if report.is_valid {
        ExitCode::Success
    } else {
        ExitCode::ValidationError
    })
}

/// Execute the submit command
pub async fn execute_submit(
    ctx: &CommandContext,
    answers: &Path,
    user_id: Option<String>,
) -> Result<ExitCode> {
    let answers = load_answers(answers)?;
    let sink: Arc<dyn ReportSink> = match ctx.config.backend {
        Backend::Sheets => Arc::new(SheetsClient::from_config(&ctx.config)?),
        Backend::DocumentStore => Arc::new(DocumentStoreClient::from_config(&ctx.config)?),
    };
    if !sink.is_configured() {
        tracing::warn!(
            backend = %ctx.config.backend,
            "No submission target configured; set REPORT_ENDPOINT_URL or REPORT_DOCSTORE_PROJECT"
        );
    }

    let workflow = SubmissionWorkflow::with_guard(ctx.guard()?, sink, identity_from(user_id));
    let outcome = workflow.submit(&answers).await;

    ctx.emit(&SubmissionOutput::from_outcome(&outcome))?;

    Ok(match outcome {
        SubmitOutcome::Submitted(_) => ExitCode::Success,
        SubmitOutcome::Invalid(_) => ExitCode::ValidationError,
        SubmitOutcome::RateLimited(_) => ExitCode::RateLimited,
        SubmitOutcome::Failed(_) => ExitCode::SubmissionFailed,
    })
}

/// Execute the status command
pub fn execute_status(ctx: &CommandContext, user_id: Option<String>) -> Result<ExitCode> {
    let guard = ctx.guard()?;
    let user_id = identity_from(user_id).current_user_id();

    let info = guard.can_submit(&user_id);
    let output = StatusOutput::new(
        user_id.as_str(),
        &info,
        guard.remaining_attempts(&user_id),
        guard.config().max_attempts,
        &guard.history(&user_id),
    );
    ctx.emit(&output)?;

    Ok(ExitCode::Success)
}

/// Execute the clear command
pub fn execute_clear(ctx: &CommandContext, user_id: Option<String>) -> Result<ExitCode> {
    let guard = ctx.guard()?;
    let user_id = identity_from(user_id).current_user_id();

    guard.clear_history(&user_id)?;
    tracing::info!(user_id = %user_id, "Submission history cleared");

    let info = guard.can_submit(&user_id);
    let output = StatusOutput::new(
        user_id.as_str(),
        &info,
        guard.remaining_attempts(&user_id),
        guard.config().max_attempts,
        &[],
    );
    ctx.emit(&output)?;

    Ok(ExitCode::Success)
}

/// Execute the questionnaire command
pub async fn execute_questionnaire(
    ctx: &CommandContext,
    answers: &Path,
    user_id: Option<String>,
    submit: bool,
) -> Result<ExitCode> {
    let answers = load_questionnaire(answers)?;
    let client = DocumentStoreClient::from_config(&ctx.config)?;
    if submit && !client.is_configured() {
        tracing::warn!("No document store configured; set REPORT_DOCSTORE_PROJECT");
    }

    let workflow = QuestionnaireWorkflow::new(Arc::new(client), identity_from(user_id));
    let report = workflow.check(&answers);
    let mut output = QuestionnaireOutput::new(&answers, &report);

    let code = if !report.is_valid {
        ExitCode::ValidationError
    } else if submit {
        let outcome = workflow.submit(&answers).await;
        output = output.with_submission(&outcome);
        if outcome.is_success() {
            ExitCode::Success
        } else {
            ExitCode::SubmissionFailed
        }
    } else {
        ExitCode::Success
    };

    ctx.emit(&output)?;
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn context(state_dir: &Path) -> CommandContext {
        CommandContext {
            config: IntakeConfig::builder().state_dir(state_dir).build(),
            format: OutputFormat::Json,
            quiet: true,
        }
    }

    const QUESTIONNAIRE: &str = r#"{
        "nome": "Rafa",
        "idade": "12",
        "quemResponde": "Outro",
        "quemRespondeOutro": "Sobrinho",
        "secaoOutro": "Criança/Adolescente",
        "sabeAbuso": "Mais ou menos",
        "tocadoVergonha": "Prefiro não responder",
        "segredoToque": "Não",
        "avontadeConversarAdulto": "Sim",
        "usaRedesSociais": "Sim",
        "mensagemDesconfortavel": "Não",
        "sabeComQuemConversar": "Sim",
        "confiaProtecaoAdultos": "Às vezes"
    }"#;

    fn answers_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json).unwrap();
        file
    }

    const VALID: &str = r#"{
        "quemResponde": "Criança",
        "idade": "10",
        "nomeCrianca": "Pedro",
        "idadeCrianca": "10",
        "genero": "Masculino",
        "categoria": "Abuso físico",
        "descricao": "Relato",
        "consentimento": true,
        "politicaPrivacidade": true
    }"#;

    #[test]
    fn test_cli_parsing() {
        let cli = IntakeCli::try_parse_from([
            "report-intake",
            "--format",
            "yaml",
            "submit",
            "--answers",
            "a.json",
            "--user-id",
            "u1",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Yaml);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            IntakeCommands::Submit { answers, user_id } => {
                assert_eq!(answers, PathBuf::from("a.json"));
                assert_eq!(user_id.as_deref(), Some("u1"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_requires_answers() {
        assert!(IntakeCli::try_parse_from(["report-intake", "validate"]).is_err());
    }

    #[test]
    fn test_load_answers() {
        let file = answers_file(VALID);
        let answers = load_answers(file.path()).unwrap();
        assert_eq!(answers.respondent, "Criança");
        assert!(answers.consent);

        let missing = load_answers(Path::new("/no/such/answers.json")).unwrap_err();
        assert!(matches!(missing, IntakeError::FileError(_)));

        let broken = answers_file("[1, 2");
        let err = load_answers(broken.path()).unwrap_err();
        assert!(matches!(err, IntakeError::InvalidInput(_)));
    }

    #[test]
    fn test_execute_validate_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let valid = answers_file(VALID);
        assert_eq!(execute_validate(&ctx, valid.path()).unwrap(), ExitCode::Success);

        let invalid = answers_file(r#"{"quemResponde": "Criança", "idade": "15"}"#);
        assert_eq!(
            execute_validate(&ctx, invalid.path()).unwrap(),
            ExitCode::ValidationError
        );
    }

    #[tokio::test]
    async fn test_submit_without_endpoint_fails_softly() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let file = answers_file(VALID);

        let code = execute_submit(&ctx, file.path(), Some("u1".to_string()))
            .await
            .unwrap();
        assert_eq!(code, ExitCode::SubmissionFailed);

        // nothing recorded
        let guard = ctx.guard().unwrap();
        assert!(guard.history("u1").is_empty());
    }

    #[test]
    fn test_status_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let guard = ctx.guard().unwrap();
        for _ in 0..3 {
            guard.record_submission("anonymous").unwrap();
        }
        assert!(!guard.can_submit("anonymous").is_allowed);

        assert_eq!(execute_status(&ctx, None).unwrap(), ExitCode::Success);
        assert_eq!(execute_clear(&ctx, None).unwrap(), ExitCode::Success);
        assert!(guard.can_submit("anonymous").is_allowed);
    }

    #[test]
    fn test_cli_parses_questionnaire() {
        let cli = IntakeCli::try_parse_from([
            "report-intake",
            "questionnaire",
            "--answers",
            "q.json",
            "--submit",
        ])
        .unwrap();

        match cli.command {
            IntakeCommands::Questionnaire {
                answers,
                user_id,
                submit,
            } => {
                assert_eq!(answers, PathBuf::from("q.json"));
                assert!(user_id.is_none());
                assert!(submit);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_questionnaire_check_only() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let complete = answers_file(QUESTIONNAIRE);
        let code = execute_questionnaire(&ctx, complete.path(), None, false)
            .await
            .unwrap();
        assert_eq!(code, ExitCode::Success);

        let partial = answers_file(r#"{"quemResponde": "Adolescente", "idade": "14"}"#);
        let code = execute_questionnaire(&ctx, partial.path(), None, true)
            .await
            .unwrap();
        assert_eq!(code, ExitCode::ValidationError);
    }

    #[tokio::test]
    async fn test_questionnaire_submit_to_document_store() {
        use wiremock::matchers::{method, path_regex};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1/projects/demo/databases/\(default\)/documents/.*/reports$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "projects/demo/databases/(default)/documents/x/reports/abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ctx = CommandContext {
            config: IntakeConfig::builder()
                .state_dir(dir.path())
                .document_store(server.uri(), "demo")
                .build(),
            format: OutputFormat::Json,
            quiet: true,
        };

        let file = answers_file(QUESTIONNAIRE);
        let code = execute_questionnaire(&ctx, file.path(), Some("u5".to_string()), true)
            .await
            .unwrap();
        assert_eq!(code, ExitCode::Success);

        // questionnaires leave the throttle alone
        assert!(ctx.guard().unwrap().history("u5").is_empty());
    }

    #[tokio::test]
    async fn test_questionnaire_submit_without_store_fails() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let file = answers_file(QUESTIONNAIRE);

        let code = execute_questionnaire(&ctx, file.path(), None, true)
            .await
            .unwrap();
        assert_eq!(code, ExitCode::SubmissionFailed);
    }
}
