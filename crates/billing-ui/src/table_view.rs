//! Plain-text summary table for the billing report.
//!
//! One row per repository in ranked order, followed by a separator and a
//! totals row. Numeric columns are right-aligned; column widths are measured
//! in terminal cells so wide characters in repository names line up.

use unicode_width::UnicodeWidthStr;

use billing_core::formatting;
use billing_core::models::BillingSummary;

const HEADERS: [&str; 3] = ["repository", "gross_amount", "% of Total"];

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

const ALIGN: [Align; 3] = [Align::Left, Align::Right, Align::Right];

/// Render every row of `summary` as an aligned text table.
pub fn render_table_view(summary: &BillingSummary) -> String {
    let body: Vec<[String; 3]> = summary
        .rows
        .iter()
        .map(|row| {
            [
                row.repository.clone(),
                formatting::format_amount(row.gross_amount),
                formatting::format_number(row.percent_of_total, 2),
            ]
        })
        .collect();

    let total = [
        "TOTAL".to_string(),
        formatting::format_amount(summary.grand_total),
        String::new(),
    ];

    let mut widths = HEADERS.map(|h| h.width());
    for cells in body.iter().chain(std::iter::once(&total)) {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.width());
        }
    }

    let header = HEADERS.map(|h| h.to_string());
    let separator = widths.map(|w| "-".repeat(w));

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    push_line(&mut out, &separator, &widths);
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }
    push_line(&mut out, &separator, &widths);
    push_line(&mut out, &total, &widths);
    out
}

fn push_line(out: &mut String, cells: &[String; 3], widths: &[usize; 3]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let pad = " ".repeat(widths[i].saturating_sub(cell.width()));
        match ALIGN[i] {
            Align::Left => {
                line.push_str(cell);
                line.push_str(&pad);
            }
            Align::Right => {
                line.push_str(&pad);
                line.push_str(cell);
            }
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

// ── Tests ──────────────────────────────────────────────────────────────────────
