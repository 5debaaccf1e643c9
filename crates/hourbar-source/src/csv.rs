//! CSV file source.

use async_trait::async_trait;
use csv_async::{AsyncReaderBuilder, ByteRecord, Trim};
use futures::StreamExt;
use hourbar_types::RawRecord;
use std::path::{Path, PathBuf};

use crate::{SourceError, TickSource};

/// A `time,code,price` CSV file, re-read on every call.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    /// Whether the first row is a header (default: no).
    has_header: bool,
    /// Field delimiter (default: comma).
    delimiter: u8,
}

impl CsvFileSource {
    /// Creates a source for a headerless, comma-separated file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            has_header: false,
            delimiter: b',',
        }
    }

    /// Sets whether the first row is a header to skip.
    #[must_use]
    pub const fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TickSource for CsvFileSource {
    async fn read_records(&self) -> Result<Vec<RawRecord>, SourceError> {
        let file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|source| SourceError::Open {
                path: self.path.clone(),
                source,
            })?;

        let mut reader = AsyncReaderBuilder::new()
            .has_headers(self.has_header)
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(Trim::All)
            .create_reader(file);

        let mut rows = reader.byte_records();
        let mut records = Vec::new();
        while let Some(row) = rows.next().await {
            let row = row.map_err(|source| SourceError::Read {
                path: self.path.clone(),
                source,
            })?;
            records.push(raw_record(&row));
        }

        Ok(records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Maps one CSV row to a raw record. Missing columns become blank fields;
/// bytes that are not UTF-8 are replaced so the parser rejects the record.
fn raw_record(row: &ByteRecord) -> RawRecord {
    let field = |idx: usize| {
        row.get(idx)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default()
    };
    RawRecord::new(field(0), field(1), field(2))
}
