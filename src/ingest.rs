//! CSV ingest and export.
//!
//! Every cell is kept as [`DataValue::Text`]; numeric coercion happens where
//! a number is actually needed (chart layout, highlight rules).

use crate::data::{DataValue, Record, Schema};
use crate::error::Result;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Read records from CSV with a header row.
///
/// Rows shorter than the header lack the trailing keys; extra cells beyond
/// the header are dropped. Blank lines are skipped.
///
/// # Errors
///
/// Returns an error if the CSV is malformed or not UTF-8.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(key, value)| (key, DataValue::from(value)))
            .collect();
        records.push(record);
    }

    log::debug!("read {} records with {} columns", records.len(), headers.len());
    Ok(records)
}

/// Read records from an in-memory CSV string.
///
/// # Errors
///
/// Returns an error if the CSV is malformed.
pub fn read_csv_str(text: &str) -> Result<Vec<Record>> {
    read_csv(text.as_bytes())
}

/// Read records from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn read_csv_file<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    log::info!("loading {}", path.display());
    read_csv(File::open(path)?)
}

/// Write records as CSV, using the schema of the first record.
///
/// Writing an empty record set produces no output.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<W: Write>(records: &[Record], writer: W) -> Result<()> {
    let Ok(schema) = Schema::infer(records) else {
        return Ok(());
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(schema.columns())?;
    for record in records {
        csv_writer.write_record(schema.columns().iter().map(|c| record.text(c)))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write records to a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_csv_file<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    write_csv(records, File::create(path)?)
}
