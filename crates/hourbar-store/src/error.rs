//! Store error types.

use hourbar_source::SourceError;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Why a rebuild attempt failed.
///
/// Cloneable so that every caller waiting on the same in-flight rebuild
/// receives the same outcome.
#[derive(Error, Debug, Clone)]
pub enum RefreshError {
    /// The record set could not be read.
    #[error("Source unreadable: {0}")]
    Source(#[source] Arc<SourceError>),

    /// The rebuild did not finish within the configured timeout.
    #[error("Rebuild timed out after {0:?}")]
    TimedOut(Duration),

    /// The rebuild task panicked or was cancelled.
    #[error("Rebuild aborted: {0}")]
    Aborted(String),
}

impl From<SourceError> for RefreshError {
    fn from(error: SourceError) -> Self {
        Self::Source(Arc::new(error))
    }
}

/// Errors returned by store lookups.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// No table has been built yet and building one failed.
    #[error("No candle table available: {0}")]
    Unavailable(#[source] RefreshError),
}
