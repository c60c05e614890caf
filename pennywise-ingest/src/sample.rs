//! Sample statement template offered to users who have no export at hand

use anyhow::{Context, Result};
use std::io::Write;

use crate::types::RawRow;

pub const SAMPLE_HEADERS: [&str; 4] = ["Date", "Description", "Amount", "Category"];

const SAMPLE_DATA: [[&str; 4]; 10] = [
    ["2024-01-01", "Grocery Store", "-45.67", "Food & Dining"],
    ["2024-01-02", "Gas Station", "-32.50", "Transportation"],
    ["2024-01-03", "Salary Deposit", "2500.00", "Income"],
    ["2024-01-04", "Netflix Subscription", "-15.99", "Entertainment"],
    ["2024-01-05", "Restaurant", "-67.89", "Food & Dining"],
    ["2024-01-06", "Electric Bill", "-89.45", "Utilities"],
    ["2024-01-07", "Amazon Purchase", "-23.99", "Shopping"],
    ["2024-01-08", "Gas Station", "-28.75", "Transportation"],
    ["2024-01-09", "Coffee Shop", "-4.50", "Food & Dining"],
    ["2024-01-10", "Movie Theater", "-12.99", "Entertainment"],
];

/// The template rows, already keyed by header
pub fn sample_rows() -> Vec<RawRow> {
    SAMPLE_DATA
        .iter()
        .map(|cells| SAMPLE_HEADERS.iter().copied().zip(cells.iter().copied()).collect())
        .collect()
}

/// Write the template as CSV
pub fn write_sample_csv<W: Write>(writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SAMPLE_HEADERS).context("writing sample header")?;
    for cells in &SAMPLE_DATA {
        wtr.write_record(cells).context("writing sample row")?;
    }
    wtr.flush().context("flushing sample CSV")?;
    Ok(())
}
