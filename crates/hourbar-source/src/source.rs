//! Tick source abstraction.

use async_trait::async_trait;
use hourbar_types::RawRecord;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use thiserror::Error;

/// Errors that make a whole record set unreadable.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source file could not be opened.
    #[error("Failed to open source '{path}': {source}")]
    Open {
        /// The path that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Reading the source failed part-way.
    #[error("Failed to read source '{path}': {source}")]
    Read {
        /// The path being read.
        path: PathBuf,
        /// The underlying CSV error.
        source: csv_async::Error,
    },

    /// The source is unavailable for another reason.
    ///
    /// The built-in sources never return this. It is the error for custom
    /// [`TickSource`] implementations whose backing store cannot be reached,
    /// such as a database or a remote feed.
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// A finite, already-closed record set that is read in full on each rebuild.
#[async_trait]
pub trait TickSource: Send + Sync + std::fmt::Debug {
    /// Reads every record of the source, in source order.
    ///
    /// # Errors
    ///
    /// Returns an error only if the record set as a whole cannot be read.
    /// Malformed individual records are returned as-is and rejected later
    /// by the parser.
    async fn read_records(&self) -> Result<Vec<RawRecord>, SourceError>;

    /// Returns a short human-readable description for logs.
    fn describe(&self) -> String;
}

/// In-memory record set.
///
/// The records can be replaced between reads, which makes this source handy
/// for embedding and for exercising refresh behavior.
#[derive(Debug, Default)]
pub struct MemorySource {
    records: RwLock<Vec<RawRecord>>,
}

impl MemorySource {
    /// Creates a source holding the given records.
    #[must_use]
    pub const fn new(records: Vec<RawRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Replaces the record set seen by subsequent reads.
    pub fn replace(&self, records: Vec<RawRecord>) {
        *self.records.write().unwrap_or_else(PoisonError::into_inner) = records;
    }

    /// Returns the number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if the source holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TickSource for MemorySource {
    async fn read_records(&self) -> Result<Vec<RawRecord>, SourceError> {
        Ok(self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} records)", self.len())
    }
}
