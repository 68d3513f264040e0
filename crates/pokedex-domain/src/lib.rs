//! # Pokedex Domain Layer
//!
//! The model, the persistence port and the error taxonomy — nothing else.
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait RecordStore     │  InMemoryRecordStore
//!   fn insert()         │  (a real driver would
//!   fn find_by_no()     │   live here too)
//! ```
//!
//! The domain defines WHAT persistence it needs; adapters say HOW.
//! Swapping the document store must never touch this crate.

pub mod error;
pub mod model;
pub mod store;

// Re-export commonly used types
pub use error::RepositoryError;
pub use model::record::{
    normalize_name, InvalidRecordId, NewPokemon, PokemonPatch, PokemonRecord, RecordId,
};
pub use store::{RecordStore, StoreError};
