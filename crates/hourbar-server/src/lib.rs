//! HTTP binding for the hourbar candle engine.
//!
//! This crate provides:
//!
//! - [`router`] - The axum [`Router`](axum::Router) serving `/candle` and `/health`
//! - [`serve`] - Binds a listener and runs the router until shutdown
//! - [`ServerConfig`] - Bind address and periodic refresh settings

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hourbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod routes;
mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError};
pub use routes::{HealthReport, router};
pub use server::serve;
