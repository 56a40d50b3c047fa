//! Per-repository aggregation of a billing export.
//!
//! Reads the CSV once, folds every line item into a [`RepositoryAccumulator`]
//! keyed by repository name, and ranks the results by spend.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use billing_core::error::{BillingError, Result};
use billing_core::formatting::percentage;
use billing_core::models::{BillingRecord, BillingSummary, RepositoryAccumulator};
use tracing::{debug, info};

// ── Reading ───────────────────────────────────────────────────────────────────

/// Parse every data row of the CSV at `path`.
///
/// The file must have a header row containing `repository` and
/// `gross_amount`; other columns are ignored. Ragged rows and missing
/// columns are reported as [`BillingError::CsvParse`].
pub fn read_billing_records(path: &Path) -> Result<Vec<BillingRecord>> {
    let parse_err = |source: csv::Error| BillingError::CsvParse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(parse_err)?;
    let headers = reader.headers().map_err(parse_err)?.clone();

    let mut records = Vec::new();
    let mut raw = csv::StringRecord::new();
    while reader.read_record(&mut raw).map_err(parse_err)? {
        let mut record: BillingRecord = raw.deserialize(Some(&headers)).map_err(parse_err)?;
        record.line = raw.position().map(|p| p.line()).unwrap_or_default();
        records.push(record);
    }

    debug!("Read {} billing rows from {}", records.len(), path.display());
    Ok(records)
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Group `records` by repository and rank the groups by gross amount.
///
/// Groups are keyed by the exact repository string. Rows whose repository
/// cell is missing belong to no group and are left out of the total. Each
/// group's sum is rounded to cents and its share is taken against the
/// unrounded total of all grouped rows. The sort is stable, so equal amounts
/// stay in key order.
pub fn aggregate_records(source: &Path, records: &[BillingRecord]) -> Result<BillingSummary> {
    let mut groups: BTreeMap<&str, RepositoryAccumulator> = BTreeMap::new();
    let mut grand_total = 0.0_f64;
    let mut record_count = 0_usize;

    for record in records {
        if is_missing(&record.repository) {
            debug!("Skipping line {}: no repository", record.line);
            continue;
        }
        let amount = parse_amount(record)?;
        if let Some(a) = amount {
            grand_total += a;
        }
        groups
            .entry(record.repository.as_str())
            .or_default()
            .add(amount);
        record_count += 1;
    }

    if groups.is_empty() {
        return Err(BillingError::EmptyData(source.to_path_buf()));
    }

    let mut rows = Vec::with_capacity(groups.len());
    for (repository, acc) in &groups {
        let mut row = acc.snapshot(repository);
        row.percent_of_total = percentage(row.gross_amount, grand_total, 2)
            .ok_or_else(|| BillingError::ZeroTotal(source.to_path_buf()))?;
        rows.push(row);
    }

    rows.sort_by(|a, b| {
        b.gross_amount
            .partial_cmp(&a.gross_amount)
            .unwrap_or(Ordering::Equal)
    });

    Ok(BillingSummary {
        source: source.to_path_buf(),
        rows,
        grand_total,
        record_count,
    })
}

/// Read and aggregate the CSV at `path` in one step.
pub fn aggregate_billing_csv(path: &Path) -> Result<BillingSummary> {
    let records = read_billing_records(path)?;
    let summary = aggregate_records(path, &records)?;
    info!(
        "Aggregated {} rows into {} repositories (total {:.2})",
        summary.record_count,
        summary.rows.len(),
        summary.grand_total
    );
    Ok(summary)
}

// ── Private ───────────────────────────────────────────────────────────────────

/// Cell texts that mean "no value" rather than a malformed amount.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell)
}

/// Blank and NA cells are missing values; anything else must be a finite number.
fn parse_amount(record: &BillingRecord) -> Result<Option<f64>> {
    let cell = record.gross_amount.trim();
    if is_missing(cell) {
        debug!("Missing gross_amount on line {}", record.line);
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(BillingError::InvalidAmount {
            line: record.line,
            value: record.gross_amount.clone(),
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
