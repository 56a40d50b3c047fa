//! Console rendering for the billing summary.
//!
//! Turns an aggregated [`billing_core::models::BillingSummary`] into either
//! an aligned text table or a JSON document for stdout.

pub mod export;
pub mod table_view;

pub use billing_core as core;
