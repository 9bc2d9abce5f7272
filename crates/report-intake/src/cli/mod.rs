//! CLI module for the report intake client
//!
//! Command-line front end over the submission workflow: validate an answer
//! file, submit it, inspect or reset the local throttle state, and check or
//! send an awareness questionnaire.

pub mod commands;
pub mod output;

pub use commands::{CommandContext, IntakeCli, IntakeCommands};
pub use output::{
    OutputFormat, QuestionnaireOutput, Render, StatusOutput, SubmissionOutput, ValidationOutput,
};

use crate::error::{IntakeError, Result};

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution
    Success = 0,
    /// Answers failed validation
    ValidationError = 1,
    /// Submission throttled
    RateLimited = 2,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Report could not be dispatched
    SubmissionFailed = 5,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Exit code for an error that aborted a command
    pub fn from_error(error: &IntakeError) -> Self {
        match error {
            IntakeError::FileError(_) => ExitCode::FileError,
            IntakeError::NotConfigured | IntakeError::Transport(_) => ExitCode::SubmissionFailed,
            e if e.is_user_error() => ExitCode::InvalidInput,
            _ => ExitCode::InternalError,
        }
    }
}

/// Run the CLI with the given arguments and return the exit code
pub async fn run(cli: IntakeCli) -> Result<ExitCode> {
    let ctx = CommandContext::from_cli(&cli)?;

    match cli.command {
        IntakeCommands::Validate { answers } => commands::execute_validate(&ctx, &answers),
        IntakeCommands::Submit { answers, user_id } => {
            commands::execute_submit(&ctx, &answers, user_id).await
        }
        IntakeCommands::Status { user_id } => commands::execute_status(&ctx, user_id),
        IntakeCommands::Clear { user_id } => commands::execute_clear(&ctx, user_id),
        IntakeCommands::Questionnaire {
            answers,
            user_id,
            submit,
        } => commands::execute_questionnaire(&ctx, &answers, user_id, submit).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_core::CoreError;

    #[test]
    fn test_exit_code_conversion() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::ValidationError), 1);
        assert_eq!(i32::from(ExitCode::RateLimited), 2);
        assert_eq!(i32::from(ExitCode::SubmissionFailed), 5);
        assert_eq!(i32::from(ExitCode::InternalError), 10);
    }

    #[test]
    fn test_exit_code_from_error() {
        assert_eq!(
            ExitCode::from_error(&IntakeError::file_error("gone")),
            ExitCode::FileError
        );
        assert_eq!(
            ExitCode::from_error(&IntakeError::config("bad")),
            ExitCode::InvalidInput
        );
        assert_eq!(
            ExitCode::from_error(&IntakeError::Core(CoreError::invalid_input("x"))),
            ExitCode::InvalidInput
        );
        assert_eq!(
            ExitCode::from_error(&IntakeError::SerializationError("x".into())),
            ExitCode::InternalError
        );
    }

    #[test]
    fn test_run_validate_command() {
        use clap::Parser;
        use std::ffi::OsString;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let answers = dir.path().join("answers.json");
        std::fs::File::create(&answers)
            .unwrap()
            .write_all(br#"{"quemResponde": "Adolescente", "idade": "0"}"#)
            .unwrap();

        let args: Vec<OsString> = vec![
            "report-intake".into(),
            "-q".into(),
            "--state-dir".into(),
            dir.path().into(),
            "validate".into(),
            "--answers".into(),
            answers.as_os_str().into(),
        ];
        let cli = IntakeCli::try_parse_from(args).unwrap();

        let code = tokio_test::block_on(run(cli)).unwrap();
        assert_eq!(code, ExitCode::ValidationError);
    }
}
