//! In-Memory RecordStore Implementation
//!
//! Thread-safe document store backed by a HashMap under RwLock.
//! Useful for testing and development; a production deployment would
//! put a real document-database driver behind the same trait.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use pokedex_domain::model::record::{NewPokemon, PokemonRecord, RecordId};
use pokedex_domain::store::{RecordStore, StoreError};

/// A stored document: the record plus store-internal metadata.
///
/// `version` is bumped on every replace and must never cross the port
/// boundary; callers only ever see the bare record.
#[derive(Debug, Clone)]
struct Document {
    record: PokemonRecord,
    version: u64,
}

type Documents = HashMap<RecordId, Document>;

/// In-memory document store with unique indexes on `no` and `name`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    documents: Arc<RwLock<Documents>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Documents>, StoreError> {
        self.documents.read().map_err(|_| StoreError::Unavailable {
            message: "failed to acquire read lock".to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Documents>, StoreError> {
        self.documents.write().map_err(|_| StoreError::Unavailable {
            message: "failed to acquire write lock".to_string(),
        })
    }
}

/// Checks the unique indexes, ignoring the document at `skip` (the one
/// being rewritten). `no` is checked before `name`, so a double conflict
/// reports the ordinal.
fn unique_violation(
    documents: &Documents,
    skip: Option<&RecordId>,
    no: i64,
    name: &str,
) -> Option<StoreError> {
    for (id, doc) in documents {
        if skip == Some(id) {
            continue;
        }
        if doc.record.no == no {
            return Some(StoreError::DuplicateKey {
                field: "no",
                value: no.to_string(),
            });
        }
        if doc.record.name == name {
            return Some(StoreError::DuplicateKey {
                field: "name",
                value: name.to_string(),
            });
        }
    }
    None
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert(&self, new: NewPokemon) -> Result<PokemonRecord, StoreError> {
        let mut documents = self.write()?;
        if let Some(conflict) = unique_violation(&documents, None, new.no, &new.name) {
            return Err(conflict);
        }

        let record = PokemonRecord {
            id: RecordId::generate(),
            no: new.no,
            name: new.name,
            extra: new.extra,
        };
        documents.insert(
            record.id.clone(),
            Document {
                record: record.clone(),
                version: 0,
            },
        );
        Ok(record)
    }

    async fn find_by_no(&self, no: i64) -> Result<Option<PokemonRecord>, StoreError> {
        let documents = self.read()?;
        Ok(documents
            .values()
            .find(|doc| doc.record.no == no)
            .map(|doc| doc.record.clone()))
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<PokemonRecord>, StoreError> {
        let documents = self.read()?;
        Ok(documents.get(id).map(|doc| doc.record.clone()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<PokemonRecord>, StoreError> {
        let documents = self.read()?;
        Ok(documents
            .values()
            .find(|doc| doc.record.name == name)
            .map(|doc| doc.record.clone()))
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<PokemonRecord>, StoreError> {
        let documents = self.read()?;
        let mut records: Vec<PokemonRecord> =
            documents.values().map(|doc| doc.record.clone()).collect();
        records.sort_by_key(|record| record.no);
        Ok(records
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn replace(&self, id: &RecordId, record: &PokemonRecord) -> Result<bool, StoreError> {
        let mut documents = self.write()?;
        if !documents.contains_key(id) {
            return Ok(false);
        }
        if let Some(conflict) = unique_violation(&documents, Some(id), record.no, &record.name) {
            return Err(conflict);
        }

        if let Some(doc) = documents.get_mut(id) {
            doc.record = record.clone();
            doc.version += 1;
        }
        Ok(true)
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, StoreError> {
        let mut documents = self.write()?;
        Ok(documents.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn seeded(store: &InMemoryRecordStore) -> Vec<PokemonRecord> {
        let names = ["bulbasaur", "ivysaur", "venusaur"];
        let mut records = Vec::new();
        for (i, name) in names.iter().enumerate() {
            let record = store.insert(NewPokemon::new(i as i64 + 1, *name)).await;
            records.push(record.unwrap());
        }
        records
    }

    #[tokio::test]
    async fn insert_assigns_a_fresh_identifier() {
        let store = InMemoryRecordStore::new();
        let record = store
            .insert(NewPokemon::new(25, "pikachu").with_extra("type", json!("electric")))
            .await
            .unwrap();

        assert_eq!(record.no, 25);
        assert_eq!(record.name, "pikachu");
        assert_eq!(record.extra["type"], json!("electric"));

        let by_id = store.find_by_id(&record.id).await.unwrap();
        assert_eq!(by_id, Some(record));
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_no() {
        let store = InMemoryRecordStore::new();
        store.insert(NewPokemon::new(1, "bulbasaur")).await.unwrap();

        let err = store
            .insert(NewPokemon::new(1, "ivysaur"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateKey {
                field: "no",
                value: "1".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_name() {
        let store = InMemoryRecordStore::new();
        store.insert(NewPokemon::new(1, "bulbasaur")).await.unwrap();

        let err = store
            .insert(NewPokemon::new(2, "bulbasaur"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateKey {
                field: "name",
                value: "bulbasaur".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn list_is_ordered_and_windowed() {
        let store = InMemoryRecordStore::new();
        // Insert out of order to prove the sort
        for (no, name) in [(3, "venusaur"), (1, "bulbasaur"), (2, "ivysaur")] {
            store.insert(NewPokemon::new(no, name)).await.unwrap();
        }

        let all = store.list(0, 10).await.unwrap();
        let nos: Vec<i64> = all.iter().map(|r| r.no).collect();
        assert_eq!(nos, vec![1, 2, 3]);

        let windowed = store.list(1, 1).await.unwrap();
        assert_eq!(windowed.len(), 1);
        assert_eq!(windowed[0].no, 2);
    }

    #[tokio::test]
    async fn replace_rewrites_and_bumps_version() {
        let store = InMemoryRecordStore::new();
        let records = seeded(&store).await;
        let mut updated = records[0].clone();
        updated.name = "bulbasaur-prime".to_string();

        assert!(store.replace(&updated.id, &updated).await.unwrap());

        let reread = store.find_by_id(&updated.id).await.unwrap().unwrap();
        assert_eq!(reread.name, "bulbasaur-prime");

        // Version metadata stays inside the store
        let documents = store.documents.read().unwrap();
        assert_eq!(documents[&updated.id].version, 1);
    }

    #[tokio::test]
    async fn replace_enforces_uniqueness_against_other_documents() {
        let store = InMemoryRecordStore::new();
        let records = seeded(&store).await;

        // Renaming a record onto another record's name conflicts...
        let mut stolen = records[0].clone();
        stolen.name = records[1].name.clone();
        let err = store.replace(&stolen.id, &stolen).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { field: "name", .. }));

        // ...but rewriting a record under its own keys is fine.
        assert!(store.replace(&records[0].id, &records[0]).await.unwrap());
    }

    #[tokio::test]
    async fn replace_of_missing_document_reports_no_match() {
        let store = InMemoryRecordStore::new();
        let records = seeded(&store).await;
        let ghost = PokemonRecord {
            id: RecordId::generate(),
            ..records[0].clone()
        };
        assert!(!store.replace(&ghost.id, &ghost).await.unwrap());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_document_existed() {
        let store = InMemoryRecordStore::new();
        let records = seeded(&store).await;

        assert!(store.delete(&records[0].id).await.unwrap());
        assert!(!store.delete(&records[0].id).await.unwrap());
        assert_eq!(store.find_by_no(1).await.unwrap(), None);
    }
}
