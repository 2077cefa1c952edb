//! Wire contracts for the optimization backend, one module per endpoint.
//!
//! Required fields fail closed: a missing or wrongly-typed value rejects
//! the whole payload. Fields declared with a serde default fail open
//! (`keywords`, `lint`, `threads` come back empty rather than erroring).

pub mod health;
pub mod jsonld;
pub mod keywords;
pub mod metadata;
pub mod rewrite;
pub mod social;

use serde::Deserialize;

/// The `{data: ...}` envelope carried by every generation endpoint except
/// `/keywords`, which returns its list bare.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}
