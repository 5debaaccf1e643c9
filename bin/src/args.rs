//! Arguments shared by every command that reads the tick file.

use anyhow::{Result, bail};
use clap::Args;
use hourbar_lib::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

/// Where the tick records come from and how to bucket them.
#[derive(Args, Debug, Clone)]
pub(crate) struct SourceArgs {
    /// Path of the `time,code,price` CSV file
    #[arg(short, long, env = "HOURBAR_SOURCE", default_value = "order_books.csv")]
    pub(crate) source: PathBuf,

    /// IANA time zone that defines the hour buckets
    #[arg(short, long, env = "HOURBAR_ZONE", default_value = ReferenceZone::DEFAULT_NAME)]
    pub(crate) zone: ReferenceZone,

    /// Skip a header row in the CSV file
    #[arg(long)]
    pub(crate) header: bool,

    /// CSV field delimiter
    #[arg(long, default_value = ",")]
    pub(crate) delimiter: char,
}

impl SourceArgs {
    /// Builds the CSV source described by these arguments.
    pub(crate) fn csv_source(&self) -> Result<CsvFileSource> {
        if !self.delimiter.is_ascii() {
            bail!("Delimiter must be a single ASCII character: {:?}", self.delimiter);
        }
        Ok(CsvFileSource::new(&self.source)
            .with_header(self.header)
            .with_delimiter(self.delimiter as u8))
    }

    /// Builds an empty candle store over the CSV source.
    pub(crate) fn store(&self, config: StoreConfig) -> Result<CandleStore> {
        let source: Arc<dyn TickSource> = Arc::new(self.csv_source()?);
        Ok(CandleStore::new(source, TickAggregator::new(self.zone), config))
    }
}
