//! PokemonRepository - CRUD facade over a document store.
//!
//! The store handle is injected at construction; this layer never talks
//! to a concrete driver. Every operation is one or more sequential
//! round-trips, no retries, no in-process cache.

use std::sync::Arc;

use tracing::error;

use pokedex_domain::error::RepositoryError;
use pokedex_domain::model::record::{
    normalize_name, NewPokemon, PokemonPatch, PokemonRecord, RecordId,
};
use pokedex_domain::store::{RecordStore, StoreError};

use crate::config::RepositoryConfig;

/// Pagination window for list queries. Absent fields take the
/// configured defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct Page {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Result indicator returned by [`PokemonRepository::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deleted {
    pub deleted: bool,
}

/// One step of the `find_one` fallback chain.
///
/// Strategies run in the order [`strategies_for`] emits them; the first
/// non-empty match wins and later strategies are never consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LookupStrategy {
    ByNo(i64),
    ById(RecordId),
    ByName(String),
}

/// Builds the ordered strategy list for a lookup key:
/// integer ordinal first, then object-identifier syntax, then the
/// lowercased and trimmed name as the last resort.
fn strategies_for(key: &str) -> Vec<LookupStrategy> {
    let mut strategies = Vec::with_capacity(3);
    if let Ok(no) = key.trim().parse::<i64>() {
        strategies.push(LookupStrategy::ByNo(no));
    }
    if let Ok(id) = RecordId::parse(key) {
        strategies.push(LookupStrategy::ById(id));
    }
    strategies.push(LookupStrategy::ByName(normalize_name(key.trim())));
    strategies
}

/// Maps a store fault to the client-facing taxonomy. Duplicate-key
/// faults keep the conflicting field and value; anything else is logged
/// here in full and surfaced as an opaque storage fault.
fn classify_store_error(err: StoreError) -> RepositoryError {
    match err {
        StoreError::DuplicateKey { field, value } => RepositoryError::DuplicateKey { field, value },
        other => {
            error!(cause = %other, "unexpected store failure");
            RepositoryError::StorageFault
        }
    }
}

/// CRUD facade for Pokemon records.
pub struct PokemonRepository {
    store: Arc<dyn RecordStore>,
    default_limit: u64,
}

impl PokemonRepository {
    pub fn new(store: Arc<dyn RecordStore>, config: RepositoryConfig) -> Self {
        Self {
            store,
            default_limit: config.default_limit,
        }
    }

    /// Persists a new record. The name is lowercased before it is stored.
    pub async fn create(&self, mut new: NewPokemon) -> Result<PokemonRecord, RepositoryError> {
        new.name = normalize_name(&new.name);
        self.store.insert(new).await.map_err(classify_store_error)
    }

    /// Records ordered ascending by `no`, windowed by the page.
    pub async fn find_all(&self, page: Page) -> Result<Vec<PokemonRecord>, RepositoryError> {
        let limit = page.limit.unwrap_or(self.default_limit);
        let offset = page.offset.unwrap_or(0);
        self.store
            .list(offset, limit)
            .await
            .map_err(classify_store_error)
    }

    /// Resolves a key that may be an ordinal number, an object identifier
    /// or a name, trying each interpretation in that order.
    pub async fn find_one(&self, key: &str) -> Result<PokemonRecord, RepositoryError> {
        for strategy in strategies_for(key) {
            let hit = match &strategy {
                LookupStrategy::ByNo(no) => self.store.find_by_no(*no).await,
                LookupStrategy::ById(id) => self.store.find_by_id(id).await,
                LookupStrategy::ByName(name) => self.store.find_by_name(name).await,
            }
            .map_err(classify_store_error)?;

            if let Some(record) = hit {
                return Ok(record);
            }
        }

        Err(RepositoryError::NotFound {
            key: key.to_string(),
        })
    }

    /// Resolves the target via [`find_one`](Self::find_one), overlays the
    /// patch onto it (field-level overwrite, patch name lowercased) and
    /// persists the merge. Returns the overlaid record.
    pub async fn update(
        &self,
        key: &str,
        mut patch: PokemonPatch,
    ) -> Result<PokemonRecord, RepositoryError> {
        let current = self.find_one(key).await?;

        if let Some(name) = patch.name.take() {
            patch.name = Some(normalize_name(&name));
        }
        let merged = patch.apply_to(&current);

        let replaced = self
            .store
            .replace(&current.id, &merged)
            .await
            .map_err(classify_store_error)?;
        if !replaced {
            // Raced deletion between resolution and the write
            return Err(RepositoryError::NotFound {
                key: key.to_string(),
            });
        }
        Ok(merged)
    }

    /// Deletes by native identifier only; no fallback resolution here.
    pub async fn remove(&self, id: &str) -> Result<Deleted, RepositoryError> {
        let Ok(record_id) = RecordId::parse(id) else {
            // An invalid identifier matches zero records
            return Err(RepositoryError::NotFound {
                key: id.to_string(),
            });
        };

        let deleted = self
            .store
            .delete(&record_id)
            .await
            .map_err(classify_store_error)?;
        if !deleted {
            return Err(RepositoryError::NotFound {
                key: id.to_string(),
            });
        }
        Ok(Deleted { deleted: true })
    }
}
