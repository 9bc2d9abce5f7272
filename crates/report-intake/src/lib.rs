//! Report Intake
//!
//! Client side of the confidential report channel: validates an answer set,
//! applies the per-user submission throttle, and dispatches the sanitized
//! report to the configured endpoint. The awareness questionnaire goes
//! through the same validation and sanitizing to a document store.
//!
//! ## Architecture
//!
//! 1. **Configuration** (`config`): defaults, TOML file and `REPORT_*`
//!    environment overrides.
//!
//! 2. **Identity** (`identity`): the user id that keys the throttle.
//!
//! 3. **Client** (`client`): the [`ReportSink`] and [`QuestionnaireSink`]
//!    seams, the spreadsheet webhook and the document store client.
//!
//! 4. **Workflow** (`submit`): validate, throttle, dispatch, record; and
//!    the unthrottled questionnaire path.
//!
//! 5. **CLI** (`cli`): the `report-intake` command.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use report_intake::{IntakeConfig, SheetsClient, StaticIdentity, SubmissionWorkflow};
//! use report_core::FormAnswers;
//! use report_security::FileStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IntakeConfig::load(None)?;
//! let workflow = SubmissionWorkflow::new(
//!     FileStore::open(&config.state_dir)?,
//!     config.rate_limit,
//!     Arc::new(SheetsClient::from_config(&config)?),
//!     Box::new(StaticIdentity::new("uid-42")),
//! );
//!
//! let outcome = workflow.submit(&FormAnswers::default()).await;
//! println!("{}", outcome.message());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod submit;

pub use cli::{ExitCode, IntakeCli, IntakeCommands, OutputFormat};
pub use client::{
    DocumentStoreClient, QuestionnaireSink, ReportSink, SheetsClient, SheetsClientBuilder,
    SubmissionPayload, SubmissionResponse, SubmissionStatus,
};
pub use config::{
    Backend, DocumentStoreConfig, IntakeConfig, IntakeConfigBuilder, DEFAULT_USER_AGENT,
};
pub use error::{IntakeError, Result};
pub use identity::{
    identity_from, AnonymousIdentity, IdentityProvider, StaticIdentity, ANONYMOUS_USER,
};
pub use submit::{QuestionnaireWorkflow, SubmissionWorkflow, SubmitOutcome};

/// Run the CLI and map any error to an exit code
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use report_intake::{run_cli, IntakeCli};
///
/// #[tokio::main]
/// async fn main() {
///     let cli = IntakeCli::parse();
///     let exit_code = run_cli(cli).await;
///     std::process::exit(exit_code.into());
/// }
/// ```
pub async fn run_cli(cli: IntakeCli) -> ExitCode {
    match cli::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::from_error(&e)
        }
    }
}
