//! Listener setup and serving.

use hourbar_query::Resolver;
use std::future::Future;
use tokio::net::TcpListener;

use crate::{ServerConfig, ServerError, router};

/// Serves the candle API until `shutdown` completes.
///
/// When [`ServerConfig::periodic_refresh`] is set, a background refresher
/// rebuilds the table every [`ServerConfig::refresh_interval`] for the
/// lifetime of the server. Lookups refresh lazily either way.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve<F>(resolver: Resolver, config: ServerConfig, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind,
            source,
        })?;
    let local_addr = listener.local_addr()?;

    let refresher = config
        .periodic_refresh
        .then(|| resolver.store().spawn_refresher(config.refresh_interval));

    tracing::info!(
        addr = %local_addr,
        zone = %resolver.store().zone(),
        periodic_refresh = config.periodic_refresh,
        "Serving candle API"
    );

    let result = axum::serve(listener, router(resolver))
        .with_graceful_shutdown(shutdown)
        .await;

    if let Some(refresher) = refresher {
        refresher.abort();
    }
    tracing::info!("Server stopped");

    result.map_err(ServerError::from)
}
