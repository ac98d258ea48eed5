//! CSV export of review records
//!
//! One row per record, in crawl order. Missing fields are written with the
//! same placeholders the terminal output uses.

use crate::extract::ReviewRecord;
use crate::output::{OutputError, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Column order of every export
pub const CSV_HEADER: [&str; 7] = [
    "rating",
    "title",
    "body",
    "reviewer_name",
    "verified_purchase",
    "date",
    "helpful_votes",
];

/// Writes records as CSV to any writer
pub fn write_records<W: Write>(writer: W, records: &[ReviewRecord]) -> OutputResult<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(CSV_HEADER)?;

    for record in records {
        writer.write_record([
            record.rating_label().as_str(),
            record.title_label(),
            record.body.as_str(),
            record.reviewer_label(),
            if record.verified_purchase { "true" } else { "false" },
            record.date_label(),
            record.helpful_votes.to_string().as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Formats records as a CSV string
pub fn to_csv_string(records: &[ReviewRecord]) -> OutputResult<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, records)?;
    String::from_utf8(buffer).map_err(|e| OutputError::Format(e.to_string()))
}

/// Writes records to a CSV file, replacing any existing file
///
/// # Arguments
///
/// * `path` - Destination file
/// * `records` - Records to export, in order
///
/// # Returns
///
/// * `Ok(())` - File written
/// * `Err(OutputError)` - File could not be created or written
pub fn write_csv(path: &Path, records: &[ReviewRecord]) -> OutputResult<()> {
    let file = File::create(path)?;
    write_records(file, records)?;

    tracing::info!("Wrote {} reviews to {}", records.len(), path.display());
    Ok(())
}
