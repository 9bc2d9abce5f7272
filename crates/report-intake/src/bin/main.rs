//! Report intake CLI
//!
//! # Usage
//!
//! ```bash
//! # Check an answer file
//! report-intake validate --answers report.json
//!
//! # Submit it for a signed-in user
//! REPORT_ENDPOINT_URL=https://script.google.com/... \
//!     report-intake submit --answers report.json --user-id uid-42
//!
//! # Inspect or reset the throttle
//! report-intake status --user-id uid-42 --format json
//! report-intake clear --user-id uid-42
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Answers failed validation
//! - 2: Submission throttled
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 5: Report could not be dispatched
//! - 10: Internal error
//!
//! Logs go to stderr; set `RUST_LOG` for fine-grained filtering and
//! `REPORT_LOG_FORMAT=json` for structured output.

use clap::Parser;
use report_intake::{run_cli, IntakeCli};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = IntakeCli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    let exit_code = run_cli(cli).await;
    std::process::exit(exit_code.into());
}

fn init_tracing(verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let json = std::env::var("REPORT_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}
