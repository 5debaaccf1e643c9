//! Tick-to-candle aggregation for the hourbar candle engine.
//!
//! This crate provides:
//!
//! - [`TickAggregator`] - Full-pass aggregator bound to a reference zone
//! - [`Aggregation`] - Candle table plus statistics of one pass
//! - [`AggregateStats`] - Record, tick, skip and bucket counts

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hourbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod stats;

pub use aggregator::TickAggregator;
pub use stats::{AggregateStats, Aggregation};
