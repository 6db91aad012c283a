//! CSV export of a [`ComparisonReport`].

use super::table::{self, Row};
use super::ComparisonReport;
use ::csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;
use std::path::Path;

/// Write the report as CSV with every field quoted.
pub fn write_csv<W: Write>(report: &ComparisonReport, writer: W) -> Result<(), ::csv::Error> {
    write_rows(&table::rows(report), writer)
}

pub fn write_csv_file(report: &ComparisonReport, out: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(out)?;
    write_csv(report, std::io::BufWriter::new(file))?;
    Ok(())
}

fn write_rows<W: Write>(rows: &[Row], writer: W) -> Result<(), ::csv::Error> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(writer);

    for r in rows {
        if r.is_empty() {
            wtr.write_record([""])?;
        } else {
            wtr.write_record(r)?;
        }
    }
    wtr.flush()?;
    Ok(())
}
