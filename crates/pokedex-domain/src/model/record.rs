//! Pokemon record - the Entity of this system.
//!
//! A record keeps its identity (the store-assigned `RecordId`) through
//! every mutation. `no` and `name` are intended unique; the store, not
//! this crate, enforces that.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Normalizes a name the way it is stored: lowercase.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// Raised when a string is not valid object-identifier syntax.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid record id '{input}': expected 24 hexadecimal digits")]
pub struct InvalidRecordId {
    pub input: String,
}

/// Store-assigned object identifier: 24 hexadecimal digits, held lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Accepts exactly 24 hex digits, any case. Normalizes to lowercase.
    pub fn parse(input: &str) -> Result<Self, InvalidRecordId> {
        let candidate = input.trim();
        if candidate.len() == 24 && candidate.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(candidate.to_ascii_lowercase()))
        } else {
            Err(InvalidRecordId {
                input: input.to_string(),
            })
        }
    }

    /// Mints a fresh identifier from 12 bytes of v4-uuid entropy.
    pub fn generate() -> Self {
        let bytes = uuid::Uuid::new_v4().into_bytes();
        let mut hex = String::with_capacity(24);
        for byte in &bytes[..12] {
            // String formatting never fails
            let _ = write!(hex, "{byte:02x}");
        }
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted Pokemon document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    /// Store-assigned, immutable, unique.
    pub id: RecordId,
    /// Externally supplied ordinal number. Unique, default sort key.
    pub no: i64,
    /// Always lowercase in storage.
    pub name: String,
    /// Opaque pass-through attributes, never inspected by the core logic.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Creation payload: everything a record has except its identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPokemon {
    pub no: i64,
    pub name: String,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl NewPokemon {
    pub fn new(no: i64, name: impl Into<String>) -> Self {
        Self {
            no,
            name: name.into(),
            extra: Map::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Partial update: present fields overwrite, absent fields keep the
/// persisted value. Extra keys overwrite at field granularity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PokemonPatch {
    pub no: Option<i64>,
    pub name: Option<String>,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl PokemonPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn renumber(no: i64) -> Self {
        Self {
            no: Some(no),
            ..Self::default()
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Overlays this patch onto a record. Pure field-level overwrite;
    /// callers normalize the patch name before applying.
    pub fn apply_to(&self, record: &PokemonRecord) -> PokemonRecord {
        let mut merged = record.clone();
        if let Some(no) = self.no {
            merged.no = no;
        }
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        for (key, value) in &self.extra {
            merged.extra.insert(key.clone(), value.clone());
        }
        merged
    }
}
