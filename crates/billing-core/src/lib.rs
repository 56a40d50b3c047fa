//! Shared building blocks for the billing summary.
//!
//! Error taxonomy, command-line settings and the validated run
//! configuration, data model, and number formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
