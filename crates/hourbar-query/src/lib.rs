//! Query validation and resolution for the hourbar candle engine.
//!
//! This crate provides:
//!
//! - [`QueryParams`] - Raw query fields as received from a caller
//! - [`Resolver`] - Validates a query and looks it up in a [`CandleStore`](hourbar_store::CandleStore)
//! - [`Resolution`] - `Found` candle or `NotFound` bucket
//! - [`QueryError`] / [`ResolveError`] - Client-input and availability failures

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hourbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod params;
mod resolver;

pub use error::{QueryError, QueryField, ResolveError};
pub use params::QueryParams;
pub use resolver::{Resolution, Resolver};
