//! CSV export for tick records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::TickRecord;

/// Column header for CSV telemetry export.
const HEADER: &str = "time_s,time_hr,unit,voltage_v,resistance_ohm,current_a,soc,reset";

/// Exports tick records to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[TickRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes tick records as CSV to any writer.
///
/// One header row, then one data row per record; byte-identical output
/// for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[TickRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in records {
        wtr.write_record(&[
            format!("{:.0}", r.time_s),
            format!("{:.4}", r.time_hr),
            r.unit.to_string(),
            format!("{:.4}", r.voltage_v),
            format!("{:.6}", r.resistance_ohm),
            format!("{:.9}", r.current_a),
            format!("{:.9}", r.soc),
            r.reset.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
