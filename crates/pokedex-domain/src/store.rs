//! RecordStore - Abstract persistence for Pokemon records.
//!
//! This trait is a PORT: it defines what operations the repository layer
//! needs from a document store, not how a concrete driver performs them.
//! Uniqueness of `no` and `name` is the store's responsibility and is
//! reported through `StoreError::DuplicateKey`.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::record::{NewPokemon, PokemonRecord, RecordId};

/// Tagged faults a store implementation can raise.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint was violated. Names the conflicting field.
    #[error("duplicate key: {field} \"{value}\" already exists")]
    DuplicateKey { field: &'static str, value: String },

    /// Any other persistence failure (driver fault, lock poisoning, ...).
    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

/// Document-store capability injected into the repository.
///
/// Every call is one round-trip; no method caches. Implementations must
/// keep `list` ordered ascending by `no` and must strip any internal
/// metadata (write versions etc.) before records cross this boundary.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists a new record, assigning its identifier.
    async fn insert(&self, new: NewPokemon) -> Result<PokemonRecord, StoreError>;

    /// Exact match on the ordinal number.
    async fn find_by_no(&self, no: i64) -> Result<Option<PokemonRecord>, StoreError>;

    /// Exact match on the object identifier.
    async fn find_by_id(&self, id: &RecordId) -> Result<Option<PokemonRecord>, StoreError>;

    /// Exact match against stored (lowercase) names.
    async fn find_by_name(&self, name: &str) -> Result<Option<PokemonRecord>, StoreError>;

    /// Window of records ordered ascending by `no`.
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<PokemonRecord>, StoreError>;

    /// Whole-record write. Returns false when no document has that id.
    async fn replace(&self, id: &RecordId, record: &PokemonRecord) -> Result<bool, StoreError>;

    /// Returns true iff a document was removed.
    async fn delete(&self, id: &RecordId) -> Result<bool, StoreError>;
}
