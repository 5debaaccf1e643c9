//! Query resolution against a candle store.

use hourbar_store::CandleStore;
use hourbar_types::{BucketKey, Candle};

use crate::{QueryParams, ResolveError};

/// Outcome of a well-formed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The bucket has trades.
    Found(Candle),
    /// The bucket has no trades.
    NotFound(BucketKey),
}

impl Resolution {
    /// Returns the candle, if found.
    #[must_use]
    pub const fn candle(&self) -> Option<Candle> {
        match self {
            Self::Found(candle) => Some(*candle),
            Self::NotFound(_) => None,
        }
    }

    /// Returns true if a candle was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Answers candle queries from a shared [`CandleStore`].
#[derive(Debug, Clone)]
pub struct Resolver {
    store: CandleStore,
}

impl Resolver {
    /// Creates a resolver over the given store.
    #[must_use]
    pub const fn new(store: CandleStore) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &CandleStore {
        &self.store
    }

    /// Validates a query and looks up its bucket.
    ///
    /// Validation happens before the store is touched, so an invalid query
    /// never triggers a rebuild.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidQuery`] for malformed parameters and
    /// [`ResolveError::Unavailable`] if no candle table could be built.
    pub async fn resolve(&self, params: &QueryParams) -> Result<Resolution, ResolveError> {
        let key = params.to_key().inspect_err(|error| {
            tracing::debug!(%error, ?params, "Rejected candle query");
        })?;
        self.resolve_key(key).await
    }

    /// Looks up an already-validated bucket key.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Unavailable`] if no candle table could be built.
    pub async fn resolve_key(&self, key: BucketKey) -> Result<Resolution, ResolveError> {
        Ok(match self.store.lookup(&key).await? {
            Some(candle) => Resolution::Found(candle),
            None => Resolution::NotFound(key),
        })
    }
}
