mod bootstrap;

use std::process::ExitCode;

use anyhow::{Context, Result};
use billing_core::settings::{RunConfig, Settings};
use billing_runtime::orchestrator::{opener_for, ReportOrchestrator};

fn main() -> ExitCode {
    exit_code(run())
}

/// Print the error chain and turn the run result into the process status.
fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("billing-summary v{} starting", env!("CARGO_PKG_VERSION"));

    execute(&settings)
}

fn execute(settings: &Settings) -> Result<()> {
    let config = RunConfig::from_settings(settings)?;
    tracing::debug!(
        "Scanning {} for {}, opening top {}",
        config.desktop_dir.display(),
        config.github_username,
        config.top_n
    );

    let opener = opener_for(&config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let outcome = ReportOrchestrator::new(&config, opener.as_ref())
        .run(&mut out)
        .context("billing summary failed")?;

    tracing::info!(
        "Done: {} repositories summarised, {} opened",
        outcome.summary.rows.len(),
        outcome.opened.opened.len()
    );

    Ok(())
}
