//! # Pokedex Repository Layer
//!
//! Application-facing CRUD facade over the `RecordStore` port:
//! name normalization, the ordered lookup fallback, pagination defaults
//! and the store-fault classification live here.

pub mod config;
pub mod repository;

pub use config::RepositoryConfig;
pub use repository::{Deleted, Page, PokemonRepository};
