//! Cached candle tables with single-flight refresh.
//!
//! This crate provides the read/refresh discipline of hourbar:
//!
//! - [`CandleStore`] - Snapshot cache with TTL policy and single-flight rebuilds
//! - [`Snapshot`] - One published, immutable candle table
//! - [`StoreConfig`] - Refresh interval, rebuild timeout and retry backoff
//! - [`StoreState`] - `Empty`, `Building` or `Ready`

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hourbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod snapshot;
mod store;

pub use config::StoreConfig;
pub use error::{RefreshError, StoreError};
pub use snapshot::{Snapshot, StoreState};
pub use store::CandleStore;
