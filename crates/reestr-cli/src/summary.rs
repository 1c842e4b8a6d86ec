//! Run summary rendering.

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use crate::commands::RunSummary;

/// Print the conversion summary table to stdout.
pub fn print_summary(summary: &RunSummary) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["metric", "value"]);
    table.add_row(["rows in", &summary.rows_in.to_string()]);
    table.add_row(["rows out", &summary.rows_out.to_string()]);
    table.add_row(["columns out", &summary.columns_out.to_string()]);
    table.add_row(["output", &summary.output.display().to_string()]);
    println!("{table}");
}
