//! Server and response errors.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hourbar_query::ResolveError;
use serde_json::json;
use std::net::SocketAddr;
use thiserror::Error;

/// Errors that stop the server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The listen address could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// The address.
        addr: SocketAddr,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The server failed while running.
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// A request outcome rendered as `{"error": ..}` with a status code.
#[derive(Debug)]
pub enum ApiError {
    /// The query string could not be decoded.
    Malformed(String),
    /// The query named a bucket with no trades.
    NotFound,
    /// The request could not be answered.
    Resolve(ResolveError),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Malformed(_) | Self::Resolve(ResolveError::InvalidQuery(_)) => StatusCode::BAD_REQUEST,
            Self::Resolve(ResolveError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Malformed(reason) => reason.clone(),
            Self::NotFound => "No data found".to_string(),
            Self::Resolve(error) => error.to_string(),
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(error: ResolveError) -> Self {
        Self::Resolve(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}
