//! Discovery of the billing export inside the desktop directory.

use std::path::{Path, PathBuf};

use billing_core::error::{BillingError, Result};
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// List every regular `.csv` file directly inside `dir`, sorted by path.
///
/// The extension match is exact and case-sensitive; subdirectories are not
/// descended into.
pub fn find_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(BillingError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(e) => e,
            // Only the listing of `dir` itself is fatal; a dangling link is skipped.
            Err(e) if e.depth() == 0 => {
                return Err(BillingError::DirectoryRead {
                    path: dir.to_path_buf(),
                    source: e.into(),
                })
            }
            Err(e) => {
                debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        if entry.file_type().is_file() && has_csv_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Return the single CSV export in `dir`.
///
/// Fails with [`BillingError::CsvNotFound`] when there is none and with
/// [`BillingError::AmbiguousCsv`] when there is more than one.
pub fn locate_billing_csv(dir: &Path) -> Result<PathBuf> {
    let mut files = find_csv_files(dir)?;
    debug!("Found {} CSV file(s) in {}", files.len(), dir.display());

    match files.len() {
        0 => Err(BillingError::CsvNotFound(dir.to_path_buf())),
        1 => Ok(files.remove(0)),
        _ => Err(BillingError::AmbiguousCsv {
            dir: dir.to_path_buf(),
            files,
        }),
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension().map(|ext| ext == "csv").unwrap_or(false)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
