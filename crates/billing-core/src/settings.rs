use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::error::{BillingError, Result};

/// Environment variable naming the directory that holds the billing export.
pub const DESKTOP_DIR_ENV: &str = "DIR_DESKTOP";

/// Environment variable holding the GitHub account the repositories live under.
pub const GITHUB_USERNAME_ENV: &str = "GITHUB_USERNAME";

/// Number of repositories opened when `--top` is not given.
pub const DEFAULT_TOP_N: usize = 10;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Summarise a GitHub billing export by repository
#[derive(Parser, Debug, Clone)]
#[command(
    name = "billing-summary",
    about = "Summarise a GitHub billing CSV by repository and open the top spenders",
    version
)]
pub struct Settings {
    /// Directory scanned for the billing CSV
    #[arg(long, env = DESKTOP_DIR_ENV)]
    pub desktop_dir: Option<PathBuf>,

    /// GitHub user the repositories belong to
    #[arg(long, env = GITHUB_USERNAME_ENV)]
    pub github_username: Option<String>,

    /// Number of top repositories to open (1-100)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u16).range(1..=100))]
    pub top: u16,

    /// Summary output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Print the URLs instead of opening them
    #[arg(long)]
    pub dry_run: bool,

    /// Browser command used instead of the platform default
    #[arg(long, env = "BROWSER")]
    pub browser: Option<String>,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// How the aggregated summary is written to stdout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned plain-text table
    #[default]
    Table,
    /// Pretty-printed JSON array
    Json,
}

impl Settings {
    /// Parse the process arguments (and environment) and apply `--debug`.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but from an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Settings {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── RunConfig ──────────────────────────────────────────────────────────────────

/// Validated configuration handed to every pipeline stage.
///
/// Built once at startup so that missing environment is reported before any
/// file is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub desktop_dir: PathBuf,
    pub github_username: String,
    pub top_n: usize,
    pub format: OutputFormat,
    pub dry_run: bool,
    pub browser: Option<String>,
}

impl RunConfig {
    /// Validate `settings`, rejecting unset or empty required values.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let desktop_dir = settings
            .desktop_dir
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| missing(DESKTOP_DIR_ENV, "--desktop-dir"))?;

        let github_username = settings
            .github_username
            .clone()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| missing(GITHUB_USERNAME_ENV, "--github-username"))?;

        let browser = settings
            .browser
            .clone()
            .filter(|cmd| !cmd.trim().is_empty());

        Ok(Self {
            desktop_dir,
            github_username,
            top_n: usize::from(settings.top),
            format: settings.format,
            dry_run: settings.dry_run,
            browser,
        })
    }
}

fn missing(var: &str, flag: &str) -> BillingError {
    BillingError::Config(format!(
        "environment variable '{var}' is not set (or pass {flag})"
    ))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
