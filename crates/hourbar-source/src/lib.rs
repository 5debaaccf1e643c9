//! Record parsing and tick sources for the hourbar candle engine.
//!
//! This crate provides the read side of a rebuild:
//!
//! - [`parse_record`] - Parses one raw record into a [`Tick`](hourbar_types::Tick)
//! - [`parse_timestamp`] - Normalizes timestamp text into an absolute instant
//! - [`TickSource`] - A finite record set that can be re-read on demand
//! - [`CsvFileSource`] - Headerless `time,code,price` CSV file
//! - [`MemorySource`] - In-memory record set

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hourbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod parse;
mod source;

pub use crate::csv::CsvFileSource;
pub use parse::{parse_price, parse_record, parse_timestamp, strip_zone_annotation};
pub use source::{MemorySource, SourceError, TickSource};
