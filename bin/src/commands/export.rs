//! Export command implementation.
//!
//! Builds the candle table once and writes it, sorted by bucket key, to a
//! file or stdout.

use crate::args::SourceArgs;
use crate::display::write_table;
use anyhow::{Context, Result};
use hourbar_lib::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the complete candle table.
pub(crate) async fn export(
    source: &SourceArgs,
    output: Option<&Path>,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let store = source.store(StoreConfig::default().with_rebuild_timeout(None))?;
    let snapshot = store
        .refresh()
        .await
        .with_context(|| format!("Failed to build candles from {}", source.source.display()))?;

    let stats = snapshot.stats();
    tracing::info!(
        records = stats.records,
        skipped = stats.skipped,
        buckets = stats.buckets,
        %format,
        "Exporting candle table"
    );

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_table(snapshot.table(), &mut writer, format, pretty)?;
            writer.flush()?;
        }
        None => {
            let mut writer = BufWriter::new(std::io::stdout());
            write_table(snapshot.table(), &mut writer, format, pretty)?;
            writer.flush()?;
        }
    }

    Ok(())
}
