//! CSV tokenization into untyped `RawRow`s.
//!
//! Any header layout is accepted; column interpretation happens later in
//! `RowNormalizer`.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::types::RawRow;

/// Read a CSV file with a header row into raw rows
pub fn read_csv_rows(path: impl AsRef<Path>) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_csv_rows_from_reader(file).with_context(|| format!("reading {}", path.display()))
}

/// Read CSV from any reader. Blank cells are omitted from the row.
pub fn read_csv_rows_from_reader<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("reading CSV header")?.clone();
    let mut rows = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading CSV record {}", i + 1))?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .filter(|(h, v)| !h.is_empty() && !v.is_empty())
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;

    #[test]
    fn test_reads_headers_as_keys() {
        let csv = "Date,Description,Amount,Category\n\
                   2024-01-01,Grocery Store,-45.67,Food & Dining\n\
                   2024-01-03,\"Salary, ACME\",\"2,500.00\",\n";
        let rows = read_csv_rows_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].lookup(Field::Category), Some("Food & Dining"));
        assert_eq!(rows[1].lookup(Field::Description), Some("Salary, ACME"));
        assert_eq!(rows[1].lookup(Field::Amount), Some("2,500.00"));
        assert_eq!(rows[1].get("Category"), None);
    }

    #[test]
    fn test_short_records_are_tolerated() {
        let csv = "date,desc,amount\n2024-01-01,Coffee\n";
        let rows = read_csv_rows_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 2);
    }
}
