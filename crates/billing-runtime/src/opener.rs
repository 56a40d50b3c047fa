//! Browser launching for the top repositories.
//!
//! [`UrlOpener`] is the only seam between the pipeline and the outside
//! world's browser; [`SystemBrowser`] shells out to the platform opener and
//! [`DryRunOpener`] only logs.

use std::io::Write;
use std::process::{Command, Stdio};

use billing_core::error::{BillingError, Result};
use tracing::{debug, info, warn};

/// Base of every generated repository URL.
pub const GITHUB_BASE_URL: &str = "https://github.com";

// ── UrlOpener ─────────────────────────────────────────────────────────────────

/// Something that can show a URL to the user.
pub trait UrlOpener {
    fn open(&self, url: &str) -> Result<()>;
}

// ── SystemBrowser ─────────────────────────────────────────────────────────────

/// Opens URLs with the platform default handler or a configured command.
#[derive(Debug, Clone, Default)]
pub struct SystemBrowser {
    command: Option<String>,
}

impl SystemBrowser {
    /// `command` overrides the platform opener. A `%s` in it is replaced by
    /// the URL; otherwise the URL is passed as the last argument.
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    /// Program and arguments that would be run for `url`.
    pub fn launch_command(&self, url: &str) -> Result<(String, Vec<String>)> {
        match self.command.as_deref() {
            Some(cmd) => custom_command(cmd, url),
            None => Ok(platform_command(url)),
        }
    }
}

impl UrlOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        let (program, args) = self.launch_command(url)?;
        debug!("Launching {} {:?}", program, args);

        let status = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| BillingError::BrowserLaunch {
                url: url.to_string(),
                message: format!("failed to run {}: {}", program, e),
            })?;

        if !status.success() {
            return Err(BillingError::BrowserLaunch {
                url: url.to_string(),
                message: format!("{} exited with {}", program, status),
            });
        }
        Ok(())
    }
}

fn custom_command(cmd: &str, url: &str) -> Result<(String, Vec<String>)> {
    let mut parts = cmd.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| BillingError::Config("browser command is empty".to_string()))?
        .to_string();
    let mut args: Vec<String> = parts.map(str::to_string).collect();

    if cmd.contains("%s") {
        for arg in &mut args {
            *arg = arg.replace("%s", url);
        }
    } else {
        args.push(url.to_string());
    }
    Ok((program, args))
}

fn platform_command(url: &str) -> (String, Vec<String>) {
    if cfg!(target_os = "macos") {
        ("open".to_string(), vec![url.to_string()])
    } else if cfg!(target_os = "windows") {
        // The empty string is the window title `start` expects first.
        (
            "cmd".to_string(),
            vec!["/C".into(), "start".into(), String::new(), url.to_string()],
        )
    } else {
        ("xdg-open".to_string(), vec![url.to_string()])
    }
}

// ── DryRunOpener ──────────────────────────────────────────────────────────────

/// Never launches anything; used for `--dry-run`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunOpener;

impl UrlOpener for DryRunOpener {
    fn open(&self, url: &str) -> Result<()> {
        info!("Dry run: not opening {}", url);
        Ok(())
    }
}

// ── Opening ───────────────────────────────────────────────────────────────────

/// Which URLs were handed to the browser and which failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenReport {
    pub opened: Vec<String>,
    /// `(url, error message)` for every launch that failed.
    pub failed: Vec<(String, String)>,
}

/// `https://github.com/{username}/{repository}`, with no escaping.
pub fn repository_url(username: &str, repository: &str) -> String {
    format!("{}/{}/{}", GITHUB_BASE_URL, username, repository)
}

/// Open one tab per repository, in order.
///
/// Each URL is announced on `out` before it is opened. A failed launch is
/// logged and recorded, and the remaining repositories are still opened.
pub fn open_repositories<W: Write>(
    repositories: &[&str],
    username: &str,
    opener: &dyn UrlOpener,
    out: &mut W,
) -> Result<OpenReport> {
    if username.is_empty() {
        return Err(BillingError::Config(
            "GitHub username is empty; cannot build repository URLs".to_string(),
        ));
    }

    let mut report = OpenReport::default();
    for repo in repositories {
        let url = repository_url(username, repo);
        writeln!(out, "Opening: {}", url)?;

        match opener.open(&url) {
            Ok(()) => report.opened.push(url),
            Err(e) => {
                warn!("{}", e);
                report.failed.push((url, e.to_string()));
            }
        }
    }

    if !report.failed.is_empty() {
        warn!(
            "{} of {} repositories could not be opened",
            report.failed.len(),
            repositories.len()
        );
    }
    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
