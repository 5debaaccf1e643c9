//! Core types for the hourbar candle engine.
//!
//! This crate provides the fundamental data structures used throughout hourbar:
//!
//! - [`RawRecord`] - One source line before parsing
//! - [`Tick`] - A parsed trade tick with an absolute timestamp
//! - [`ReferenceZone`] - The fixed time zone that defines hour buckets
//! - [`BucketKey`] - Structured (instrument, year, month, day, hour) key
//! - [`Candle`] - Open/high/low/close summary of one bucket
//! - [`CandleTable`] - Output of one complete aggregation pass

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hourbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bucket;
mod candle;
mod error;
mod table;
mod tick;
mod zone;

pub use bucket::BucketKey;
pub use candle::Candle;
pub use error::{BucketKeyError, ParseError, ZoneError};
pub use table::CandleTable;
pub use tick::{RawRecord, Tick};
pub use zone::ReferenceZone;
