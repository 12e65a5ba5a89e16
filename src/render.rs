// Text and CSV rendering of garment rows
//
// Column layout: Name | Category | Price Per Wear | Times Worn | Last Worn | Notes

use crate::query::GarmentRow;
use anyhow::{Context, Result};
use std::io::Write;

const RULE_WIDTH: usize = 131;

/// Table header plus a dashed rule
pub fn header() -> String {
    format!(
        "{:<20} | {:<12} | {:<14} | {:<10} | {:<10} | {:<50}\n{}",
        "Name",
        "Category",
        "Price Per Wear",
        "Times Worn",
        "Last Worn",
        "Notes",
        "-".repeat(RULE_WIDTH)
    )
}

/// One fixed-width table line
pub fn row_line(row: &GarmentRow) -> String {
    format!(
        "{:<20} | {:<12} | {:<14.2} | {:<10} | {:<10} | {:<50}",
        row.name, row.category, row.price_per_wear, row.times_worn, row.last_worn, row.notes
    )
    .trim_end()
    .to_string()
}

/// Header followed by every row
pub fn table(rows: &[GarmentRow]) -> String {
    let mut out = header();
    for row in rows {
        out.push('\n');
        out.push_str(&row_line(row));
    }
    out
}

/// Money with two decimals (no locale handling)
pub fn money(value: f64) -> String {
    format!("${:.2}", value)
}

/// Write rows as CSV with a header line
pub fn write_csv<W: Write>(writer: W, rows: &[GarmentRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer
            .serialize(row)
            .context("Failed to write garment row as CSV")?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}
