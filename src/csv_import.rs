//! CSV import for distribution rows.
//!
//! Input files are headerless comma-separated text, one `address,amount`
//! pair per line. Only the first two columns are read; records with fewer
//! than two fields are dropped. A textual header row is not special-cased:
//! it passes through as data and is rejected later by validation.

use crate::types::DistributionRow;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Parse distribution rows out of any CSV reader, preserving input order.
pub fn import_csv_reader<R: Read>(reader: R) -> Result<Vec<DistributionRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.context("failed to read CSV record")?;
        if record.len() < 2 {
            continue;
        }
        rows.push(DistributionRow::new(&record[0], &record[1]));
    }
    Ok(rows)
}

/// Parse a CSV file into distribution rows. The caller is expected to
/// replace the form's current row list with the result, not append to it.
pub fn import_csv_file(path: impl AsRef<Path>) -> Result<Vec<DistributionRow>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let rows = import_csv_reader(file)?;
    info!(
        "Imported {} distribution rows from {}",
        rows.len(),
        path.display()
    );
    Ok(rows)
}
