//! CSV export for grid step results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::StepResult;

/// Fixed leading columns; one column per link follows.
const HEADER: &str = "timestep,time_hr,generated,consumed,unmet,transferred,stored";

/// Exports step results to a CSV file at the given path.
///
/// # Arguments
///
/// * `results` - Complete grid step results
/// * `link_labels` - One column header per link, in declaration order
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[StepResult], link_labels: &[String], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, link_labels, buf)
}

/// Writes step results as CSV to any writer.
///
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(
    results: &[StepResult],
    link_labels: &[String],
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(
        HEADER
            .split(',')
            .map(str::to_string)
            .chain(link_labels.iter().cloned()),
    )?;

    for r in results {
        let mut record = vec![
            r.timestep.to_string(),
            format!("{:.2}", r.time_hr),
            r.generated.to_string(),
            r.consumed.to_string(),
            r.unmet.to_string(),
            r.transferred.to_string(),
            r.stored.to_string(),
        ];
        record.extend(r.link_moved.iter().map(ToString::to_string));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
