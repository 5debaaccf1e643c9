//! Serve command implementation.
//!
//! Runs the HTTP binding over a lazily refreshed candle store until Ctrl-C.

use crate::args::SourceArgs;
use anyhow::{Context, Result};
use hourbar_lib::prelude::*;
use std::net::SocketAddr;
use std::time::Duration;

/// Serve candle queries until interrupted.
pub(crate) async fn serve(
    source: &SourceArgs,
    bind: SocketAddr,
    refresh_secs: u64,
    rebuild_timeout_secs: u64,
    periodic: bool,
) -> Result<()> {
    let refresh_interval = Duration::from_secs(refresh_secs.max(1));
    let rebuild_timeout = (rebuild_timeout_secs > 0).then(|| Duration::from_secs(rebuild_timeout_secs));

    let store_config = StoreConfig::default()
        .with_refresh_interval(refresh_interval)
        .with_rebuild_timeout(rebuild_timeout);
    let store = source.store(store_config)?;

    let server_config = ServerConfig::default()
        .with_bind(bind)
        .with_refresh_interval(refresh_interval)
        .with_periodic_refresh(periodic);

    hourbar_lib::serve(Resolver::new(store), server_config, shutdown_signal())
        .await
        .with_context(|| format!("Candle server on {bind} failed"))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown requested"),
        Err(error) => tracing::error!(%error, "Failed to listen for Ctrl-C"),
    }
}
