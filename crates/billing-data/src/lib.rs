//! Data ingestion layer for the billing summary.
//!
//! Finds the single CSV export in the desktop directory and aggregates its
//! line items by repository.

pub mod aggregator;
pub mod locator;

pub use billing_core as core;
