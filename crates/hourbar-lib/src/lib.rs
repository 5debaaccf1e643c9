//! Hourly OHLC candles from tick records, with cached single-flight refresh.
//!
//! This is a facade crate that re-exports functionality from the hourbar
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use hourbar_lib::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Arc::new(CsvFileSource::new("order_books.csv"));
//!     let store = CandleStore::new(source, TickAggregator::default(), StoreConfig::default());
//!     let resolver = Resolver::new(store);
//!
//!     let query = QueryParams::new("XYZ", 2024, 3, 5, 7);
//!     match resolver.resolve(&query).await? {
//!         Resolution::Found(candle) => println!("{candle:?}"),
//!         Resolution::NotFound(key) => println!("No trades in {key}"),
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hourbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use hourbar_types::*;

// Re-export record sources and parsing
pub use hourbar_source::{
    CsvFileSource, MemorySource, SourceError, TickSource, parse_price, parse_record,
    parse_timestamp,
};

// Re-export aggregation
pub use hourbar_aggregate::{AggregateStats, Aggregation, TickAggregator};

// Re-export the store
pub use hourbar_store::{
    CandleStore, RefreshError, Snapshot, StoreConfig, StoreError, StoreState,
};

// Re-export query resolution
pub use hourbar_query::{QueryError, QueryField, QueryParams, Resolution, ResolveError, Resolver};

// Re-export formatters
#[cfg(feature = "format")]
pub use hourbar_format::{
    CandleRow, CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
};

// Re-export the HTTP binding
#[cfg(feature = "server")]
pub use hourbar_server::{ApiError, HealthReport, ServerConfig, ServerError, router, serve};

/// Prelude module for convenient imports.
///
/// ```
/// use hourbar_lib::prelude::*;
/// ```
pub mod prelude {
    pub use hourbar_types::{BucketKey, Candle, CandleTable, RawRecord, ReferenceZone, Tick};

    pub use hourbar_source::{CsvFileSource, MemorySource, TickSource};

    pub use hourbar_aggregate::TickAggregator;

    pub use hourbar_store::{CandleStore, StoreConfig, StoreState};

    pub use hourbar_query::{QueryParams, Resolution, Resolver};

    #[cfg(feature = "format")]
    pub use hourbar_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(feature = "server")]
    pub use hourbar_server::{ServerConfig, serve};
}
