//! # Pokedex - document-store-backed Pokemon repository
//!
//! This is the entry point that wires everything together:
//!
//! ```text
//! main.rs (this file) - Dependency Injection & Wiring
//!   ├── Creates: InMemoryRecordStore        (adapter)
//!   ├── Creates: PokemonRepository          (use-case facade)
//!   └── Runs:    a seeded demonstration of every operation
//! ```
//!
//! Swap the adapter for a real document-database driver and nothing
//! below the construction site changes.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use pokedex_domain::model::record::{NewPokemon, PokemonPatch};
use pokedex_repository::{Page, PokemonRepository, RepositoryConfig};
use pokedex_store_memory::InMemoryRecordStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Pokedex - document-store-backed Pokemon repository");

    // ========================================
    // Dependency Injection - Wire up the system
    // ========================================

    // Adapter (could be swapped for a real document-database driver)
    let store = Arc::new(InMemoryRecordStore::new());

    // Configuration is read once, here
    let config = RepositoryConfig::from_env();
    info!(default_limit = config.default_limit, "repository configured");

    let repository = PokemonRepository::new(store, config);

    // ========================================
    // Seed a few records
    // ========================================

    info!("seeding records...");

    let seeds = [
        (1, "Bulbasaur", "grass"),
        (4, "Charmander", "fire"),
        (7, "Squirtle", "water"),
        (25, "Pikachu", "electric"),
    ];
    for (no, name, kind) in seeds {
        let record = repository
            .create(NewPokemon::new(no, name).with_extra("type", json!(kind)))
            .await?;
        info!(no = record.no, name = %record.name, id = %record.id, "created");
    }

    // Uniqueness is the store's job; the repository translates the fault
    if let Err(err) = repository.create(NewPokemon::new(25, "Raichu")).await {
        warn!(%err, "duplicate ordinal rejected");
    }

    // ========================================
    // Lookups: ordinal, identifier, name
    // ========================================

    let by_no = repository.find_one("25").await?;
    let by_id = repository.find_one(by_no.id.as_str()).await?;
    let by_name = repository.find_one("PIKACHU").await?;
    info!(
        no = by_no.no,
        id = %by_id.id,
        name = %by_name.name,
        "one record, three lookup strategies"
    );

    // ========================================
    // List, update, remove
    // ========================================

    let page = repository.find_all(Page::default()).await?;
    info!(count = page.len(), "listed first page");

    let evolved = repository
        .update("charmander", PokemonPatch::rename("Charmeleon"))
        .await?;
    info!(name = %evolved.name, no = evolved.no, "updated");

    let target = repository.find_one("squirtle").await?;
    let outcome = repository.remove(target.id.as_str()).await?;
    info!(deleted = outcome.deleted, "removed squirtle");

    if let Err(err) = repository.find_one("squirtle").await {
        info!(%err, "squirtle is gone for every strategy");
    }

    Ok(())
}
