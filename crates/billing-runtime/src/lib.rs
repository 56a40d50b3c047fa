//! Runtime layer for the billing summary.
//!
//! Owns the browser-opening capability and the orchestrator that runs the
//! locate → aggregate → report → open pipeline once.

pub mod opener;
pub mod orchestrator;

pub use billing_core as core;
pub use billing_data as data;
