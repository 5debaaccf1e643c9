//! CLI command implementations.

pub(crate) mod export;
pub(crate) mod query;
pub(crate) mod serve;
