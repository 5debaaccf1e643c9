//! Output formatting for the hourbar CLI.

use anyhow::Result;
use hourbar_lib::prelude::*;
use std::io::Write;

/// Write a candle table in the specified format.
pub(crate) fn write_table<W: Write + Send>(
    table: &CandleTable,
    writer: W,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let formatter = CsvFormatter::new();
            formatter.write_table(table, writer)?;
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new().with_pretty(pretty);
            formatter.write_table(table, writer)?;
        }
        OutputFormat::Ndjson => {
            let formatter = JsonFormatter::ndjson();
            formatter.write_table(table, writer)?;
        }
    }

    Ok(())
}
