use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the billing summary.
#[derive(Error, Debug)]
pub enum BillingError {
    /// A required setting is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The directory to scan does not exist or is not a directory.
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// The directory could not be listed.
    #[error("Failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No CSV files were found directly inside the given directory.
    #[error("No CSV files found in {0}")]
    CsvNotFound(PathBuf),

    /// More than one CSV file was found and none can be preferred.
    #[error("Multiple CSV files found in {}: {}", dir.display(), format_paths(files))]
    AmbiguousCsv { dir: PathBuf, files: Vec<PathBuf> },

    /// The CSV file is malformed or lacks a required column.
    #[error("Failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A `gross_amount` cell is not a number.
    #[error("Invalid gross_amount {value:?} on line {line}")]
    InvalidAmount { line: u64, value: String },

    /// The CSV has a header but no data rows.
    #[error("No billing rows in {0}; cannot compute percentages")]
    EmptyData(PathBuf),

    /// Every row summed to zero so no share of the total can be derived.
    #[error("Total gross amount in {0} is zero; cannot compute percentages")]
    ZeroTotal(PathBuf),

    /// The browser could not be launched for a URL.
    #[error("Failed to open {url}: {message}")]
    BrowserLaunch { url: String, message: String },

    /// JSON serialisation of the summary failed.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the billing crates.
pub type Result<T> = std::result::Result<T, BillingError>;

fn format_paths(files: &[PathBuf]) -> String {
    files
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
