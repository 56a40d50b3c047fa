//! Data types shared between the billing crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::formatting::round_to;

// ── BillingRecord ─────────────────────────────────────────────────────────────

/// One line item of the billing export.
///
/// Only the two columns the summary needs are mapped; any other columns in
/// the CSV are ignored. `gross_amount` is kept as the raw cell text so blank
/// cells can be told apart from malformed ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BillingRecord {
    pub repository: String,
    pub gross_amount: String,
    /// 1-based line in the source file, filled in by the reader.
    #[serde(skip)]
    pub line: u64,
}

// ── RepositoryAccumulator ─────────────────────────────────────────────────────

/// Running totals for one repository while the export is being scanned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepositoryAccumulator {
    pub gross_amount: f64,
    pub row_count: u32,
}

impl RepositoryAccumulator {
    /// Add one line item's amount. `None` is a blank cell and only bumps the count.
    pub fn add(&mut self, amount: Option<f64>) {
        if let Some(a) = amount {
            self.gross_amount += a;
        }
        self.row_count += 1;
    }

    /// Freeze the running sum into a summary row, rounded to cents.
    pub fn snapshot(&self, repository: &str) -> RepositorySummary {
        RepositorySummary {
            repository: repository.to_string(),
            gross_amount: round_to(self.gross_amount, 2),
            percent_of_total: 0.0,
            row_count: self.row_count,
        }
    }
}

// ── RepositorySummary ─────────────────────────────────────────────────────────

/// Aggregated spend for one repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositorySummary {
    pub repository: String,
    /// Sum of all line items, rounded to 2 decimal places.
    pub gross_amount: f64,
    /// Share of the grand total in percent, rounded to 2 decimal places.
    pub percent_of_total: f64,
    pub row_count: u32,
}

// ── BillingSummary ────────────────────────────────────────────────────────────

/// The ranked result of aggregating one export.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingSummary {
    /// File the rows were read from.
    pub source: PathBuf,
    /// Rows sorted by `gross_amount`, largest first.
    pub rows: Vec<RepositorySummary>,
    /// Unrounded sum of every line item.
    pub grand_total: f64,
    /// Number of data rows that belong to a repository.
    pub record_count: usize,
}

impl BillingSummary {
    /// Names of the first `n` repositories, or all of them when there are fewer.
    pub fn top_repositories(&self, n: usize) -> Vec<&str> {
        self.rows
            .iter()
            .take(n)
            .map(|r| r.repository.as_str())
            .collect()
    }
}
