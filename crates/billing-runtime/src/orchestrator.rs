//! Run-to-completion billing report.
//!
//! Drives the three stages in order (locate, aggregate, open), writing the
//! user-facing report to the supplied writer. Any stage error ends the run;
//! only browser launches are allowed to fail individually.

use std::io::Write;

use billing_core::error::Result;
use billing_core::models::BillingSummary;
use billing_core::settings::{OutputFormat, RunConfig};
use billing_data::aggregator::aggregate_billing_csv;
use billing_data::locator::locate_billing_csv;
use billing_ui::export::render_json;
use billing_ui::table_view::render_table_view;
use tracing::info;

use crate::opener::{open_repositories, DryRunOpener, OpenReport, SystemBrowser, UrlOpener};

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: BillingSummary,
    pub opened: OpenReport,
}

/// The opener matching `config`: a no-op for dry runs, the system browser otherwise.
pub fn opener_for(config: &RunConfig) -> Box<dyn UrlOpener> {
    if config.dry_run {
        Box::new(DryRunOpener)
    } else {
        Box::new(SystemBrowser::new(config.browser.clone()))
    }
}

/// Sequential report pipeline bound to one validated configuration.
pub struct ReportOrchestrator<'a> {
    config: &'a RunConfig,
    opener: &'a dyn UrlOpener,
}

impl<'a> ReportOrchestrator<'a> {
    pub fn new(config: &'a RunConfig, opener: &'a dyn UrlOpener) -> Self {
        Self { config, opener }
    }

    /// Locate the export, print the ranked summary and open the top repositories.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<RunOutcome> {
        let csv_path = locate_billing_csv(&self.config.desktop_dir)?;
        writeln!(out, "Reading billing data from: {}", csv_path.display())?;

        let summary = aggregate_billing_csv(&csv_path)?;

        writeln!(out)?;
        writeln!(out, "Billing Summary by Repository:")?;
        match self.config.format {
            OutputFormat::Table => write!(out, "{}", render_table_view(&summary))?,
            OutputFormat::Json => writeln!(out, "{}", render_json(&summary)?)?,
        }

        let top = summary.top_repositories(self.config.top_n);
        info!("Opening top {} of {} repositories", top.len(), summary.rows.len());
        let opened = open_repositories(&top, &self.config.github_username, self.opener, out)?;

        Ok(RunOutcome { summary, opened })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use billing_core::error::BillingError;
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingOpener {
        seen: RefCell<Vec<String>>,
    }

    impl UrlOpener for RecordingOpener {
        fn open(&self, url: &str) -> Result<()> {
            self.seen.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    fn config(dir: &Path) -> RunConfig {
        RunConfig {
            desktop_dir: dir.to_path_buf(),
            github_username: "octocat".to_string(),
            top_n: 10,
            format: OutputFormat::Table,
            dry_run: false,
            browser: None,
        }
    }

    fn write_export(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).expect("write csv");
    }

    #[test]
    fn test_run_prints_summary_and_opens_in_rank_order() {
        let tmp = TempDir::new().expect("tempdir");
        write_export(
            tmp.path(),
            "usage.csv",
            "repository,gross_amount\nalpha,50.00\nbeta,150.00\nalpha,50.00\n",
        );
        let cfg = config(tmp.path());
        let opener = RecordingOpener::default();
        let mut out: Vec<u8> = Vec::new();

        let outcome = ReportOrchestrator::new(&cfg, &opener)
            .run(&mut out)
            .expect("run");

        assert_eq!(
            *opener.seen.borrow(),
            vec!["https://github.com/octocat/beta", "https://github.com/octocat/alpha"]
        );
        assert_eq!(outcome.summary.rows[0].percent_of_total, 60.0);

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("Reading billing data from: "));
        assert!(text.contains("usage.csv"));
        assert!(text.contains("\nBilling Summary by Repository:\n"));
        assert!(text.contains("Opening: https://github.com/octocat/beta"));
    }

    #[test]
    fn test_run_opens_only_as_many_as_exist() {
        let tmp = TempDir::new().expect("tempdir");
        write_export(
            tmp.path(),
            "usage.csv",
            "repository,gross_amount\nx,1\ny,2\nz,3\n",
        );
        let cfg = config(tmp.path());
        let opener = RecordingOpener::default();

        let outcome = ReportOrchestrator::new(&cfg, &opener)
            .run(&mut std::io::sink())
            .expect("run");

        assert_eq!(opener.seen.borrow().len(), 3);
        assert_eq!(outcome.opened.opened.len(), 3);
    }

    #[test]
    fn test_run_caps_at_top_n_but_prints_all() {
        let tmp = TempDir::new().expect("tempdir");
        let mut body = String::from("repository,gross_amount\n");
        for i in 0..12 {
            body.push_str(&format!("repo{i:02},{}\n", 100 - i));
        }
        write_export(tmp.path(), "usage.csv", &body);
        let cfg = config(tmp.path());
        let opener = RecordingOpener::default();
        let mut out: Vec<u8> = Vec::new();

        ReportOrchestrator::new(&cfg, &opener)
            .run(&mut out)
            .expect("run");

        assert_eq!(opener.seen.borrow().len(), 10);
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("repo11"));
        assert!(!text.contains("Opening: https://github.com/octocat/repo10"));
    }

    #[test]
    fn test_run_empty_directory_never_opens() {
        let tmp = TempDir::new().expect("tempdir");
        let cfg = config(tmp.path());
        let opener = RecordingOpener::default();
        let mut out: Vec<u8> = Vec::new();

        let err = ReportOrchestrator::new(&cfg, &opener)
            .run(&mut out)
            .unwrap_err();

        assert!(matches!(err, BillingError::CsvNotFound(_)));
        assert!(opener.seen.borrow().is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_two_exports_is_ambiguous() {
        let tmp = TempDir::new().expect("tempdir");
        write_export(tmp.path(), "may.csv", "repository,gross_amount\na,1\n");
        write_export(tmp.path(), "june.csv", "repository,gross_amount\na,1\n");
        let cfg = config(tmp.path());
        let opener = RecordingOpener::default();

        let err = ReportOrchestrator::new(&cfg, &opener)
            .run(&mut std::io::sink())
            .unwrap_err();

        let msg = err.to_string();
        assert!(matches!(err, BillingError::AmbiguousCsv { .. }));
        assert!(msg.contains("may.csv") && msg.contains("june.csv"));
        assert!(opener.seen.borrow().is_empty());
    }

    #[test]
    fn test_run_json_format() {
        let tmp = TempDir::new().expect("tempdir");
        write_export(tmp.path(), "usage.csv", "repository,gross_amount\nwidgets,5\n");
        let mut cfg = config(tmp.path());
        cfg.format = OutputFormat::Json;
        let opener = RecordingOpener::default();
        let mut out: Vec<u8> = Vec::new();

        ReportOrchestrator::new(&cfg, &opener)
            .run(&mut out)
            .expect("run");

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("\"repository\": \"widgets\""));
        assert_eq!(
            *opener.seen.borrow(),
            vec!["https://github.com/octocat/widgets"]
        );
    }

    #[test]
    fn test_opener_for_dry_run_does_not_launch() {
        let tmp = TempDir::new().expect("tempdir");
        write_export(tmp.path(), "usage.csv", "repository,gross_amount\nwidgets,5\n");
        let mut cfg = config(tmp.path());
        cfg.dry_run = true;
        let opener = opener_for(&cfg);

        let outcome = ReportOrchestrator::new(&cfg, opener.as_ref())
            .run(&mut std::io::sink())
            .expect("run");

        assert_eq!(outcome.opened.opened, vec!["https://github.com/octocat/widgets"]);
    }

    #[test]
    fn test_dry_run_still_lists_urls_in_report() {
        let tmp = TempDir::new().expect("tempdir");
        write_export(
            tmp.path(),
            "usage.csv",
            "repository,gross_amount\nwidgets,5\ngadgets,2\n",
        );
        let mut cfg = config(tmp.path());
        cfg.dry_run = true;
        let opener = opener_for(&cfg);
        let mut out: Vec<u8> = Vec::new();

        ReportOrchestrator::new(&cfg, opener.as_ref())
            .run(&mut out)
            .expect("run");

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Opening: https://github.com/octocat/widgets\n"));
        assert!(text.contains("Opening: https://github.com/octocat/gadgets\n"));
    }

    #[test]
    fn test_run_skips_rows_without_repository() {
        let tmp = TempDir::new().expect("tempdir");
        write_export(tmp.path(), "usage.csv", "repository,gross_amount\n,500\nalpha,5\n");
        let cfg = config(tmp.path());
        let opener = RecordingOpener::default();

        let outcome = ReportOrchestrator::new(&cfg, &opener)
            .run(&mut std::io::sink())
            .expect("run");

        assert_eq!(outcome.summary.rows.len(), 1);
        assert_eq!(outcome.summary.rows[0].percent_of_total, 100.0);
        assert_eq!(*opener.seen.borrow(), vec!["https://github.com/octocat/alpha"]);
    }
}
