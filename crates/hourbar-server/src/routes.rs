//! HTTP routes.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use hourbar_aggregate::AggregateStats;
use hourbar_query::{QueryParams, Resolution, Resolver};
use hourbar_store::StoreState;
use hourbar_types::Candle;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::ApiError;

/// Builds the router serving `/candle` and `/health`.
pub fn router(resolver: Resolver) -> Router {
    Router::new()
        .route("/candle", get(get_candle))
        .route("/health", get(health))
        .with_state(resolver)
        .layer(TraceLayer::new_for_http())
}

async fn get_candle(
    State(resolver): State<Resolver>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<Candle>, ApiError> {
    let Query(params) = query.map_err(|rejection| ApiError::Malformed(rejection.body_text()))?;

    match resolver.resolve(&params).await? {
        Resolution::Found(candle) => Ok(Json(candle)),
        Resolution::NotFound(key) => {
            tracing::debug!(%key, "No candle for bucket");
            Err(ApiError::NotFound)
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    /// Store lifecycle state.
    pub state: StoreState,
    /// Reference zone name.
    pub zone: &'static str,
    /// Sequence number of the current table.
    pub generation: Option<u64>,
    /// When the current table was built.
    pub built_at: Option<DateTime<Utc>>,
    /// Seconds since the current table was built.
    pub age_secs: Option<u64>,
    /// Statistics of the pass that built the current table.
    pub stats: Option<AggregateStats>,
    /// Error of the most recent rebuild, if it failed.
    pub last_error: Option<String>,
}

impl HealthReport {
    /// Describes the store behind a resolver, without refreshing it.
    #[must_use]
    pub fn collect(resolver: &Resolver) -> Self {
        let store = resolver.store();
        let snapshot = store.snapshot();
        Self {
            state: store.state(),
            zone: store.zone().name(),
            generation: snapshot.as_ref().map(|s| s.generation()),
            built_at: snapshot.as_ref().map(|s| s.built_at()),
            age_secs: snapshot.as_ref().map(|s| s.age().as_secs()),
            stats: snapshot.as_ref().map(|s| s.stats()),
            last_error: store.last_failure().map(|error| error.to_string()),
        }
    }
}

async fn health(State(resolver): State<Resolver>) -> (StatusCode, Json<HealthReport>) {
    let report = HealthReport::collect(&resolver);
    let status = if report.generation.is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}
