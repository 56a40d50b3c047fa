//! JSON rendering of the aggregated rows.

use billing_core::error::Result;
use billing_core::models::BillingSummary;

/// Serialise the ranked rows as a pretty-printed JSON array.
pub fn render_json(summary: &BillingSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(&summary.rows)?)
}
