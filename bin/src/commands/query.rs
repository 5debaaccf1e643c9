//! Query command implementation.
//!
//! Builds the candle table once and prints the requested candle.

use crate::args::SourceArgs;
use anyhow::{Context, Result};
use hourbar_lib::prelude::*;
use serde_json::json;
use std::process::ExitCode;

/// Print one candle as JSON. Exits with failure if the bucket has no trades.
pub(crate) async fn query(source: &SourceArgs, params: &QueryParams) -> Result<ExitCode> {
    match resolve(source, params).await? {
        Resolution::Found(candle) => {
            println!("{}", serde_json::to_string(&candle)?);
            Ok(ExitCode::SUCCESS)
        }
        Resolution::NotFound(key) => {
            tracing::info!(%key, "No trades in bucket");
            println!("{}", json!({ "error": "No data found" }));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn resolve(source: &SourceArgs, params: &QueryParams) -> Result<Resolution> {
    let store = source.store(StoreConfig::default())?;
    Resolver::new(store)
        .resolve(params)
        .await
        .with_context(|| format!("Query against {} failed", source.source.display()))
}
