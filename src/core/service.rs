//! Entity service: CRUD and pagination over a [`PokemonStore`]

use crate::core::entity::{Pokemon, PokemonAttributes, PokemonPatch};
use crate::core::error::StorageError;
use crate::core::query::{PageRequest, PokemonPage};
use crate::core::store::PokemonStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// CRUD operations on the catalog
///
/// Every operation loads the collection fresh from the store; every mutation
/// rewrites it in full. Mutations run under a write lock so that two requests
/// in this process never interleave their load/mutate/save cycles (ids stay
/// unique, no lost updates). Separate processes sharing one file can still
/// race.
///
/// "Not found" is not an error here: `get`/`update` return `None` and
/// `delete` returns `false`, and the HTTP layer turns that into a 404.
pub struct PokemonService {
    store: Arc<dyn PokemonStore>,
    write_lock: Mutex<()>,
}

impl PokemonService {
    pub fn new(store: Arc<dyn PokemonStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Get one page of the catalog
    pub async fn list(&self, request: PageRequest) -> Result<PokemonPage, StorageError> {
        let collection = self.store.load().await?;
        Ok(PokemonPage::from_collection(collection, request))
    }

    /// Get a Pokemon by ID
    pub async fn get(&self, id: u64) -> Result<Option<Pokemon>, StorageError> {
        let collection = self.store.load().await?;
        Ok(collection.into_iter().find(|p| p.id == id))
    }

    /// Create a Pokemon, assigning `max(id) + 1` (or 1 for an empty catalog)
    pub async fn create(&self, attributes: PokemonAttributes) -> Result<Pokemon, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut collection = self.store.load().await?;
        let id = next_id(&collection);
        let pokemon = Pokemon::new(id, attributes);

        collection.push(pokemon.clone());
        self.store.save(&collection).await?;

        tracing::info!(id, name = pokemon.name(), "created pokemon");
        Ok(pokemon)
    }

    /// Overwrite the supplied fields of an existing Pokemon
    pub async fn update(
        &self,
        id: u64,
        patch: PokemonPatch,
    ) -> Result<Option<Pokemon>, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut collection = self.store.load().await?;
        let Some(pokemon) = collection.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        pokemon.apply(patch);
        let updated = pokemon.clone();
        self.store.save(&collection).await?;

        tracing::info!(id, "updated pokemon");
        Ok(Some(updated))
    }

    /// Delete a Pokemon; `false` when it did not exist
    pub async fn delete(&self, id: u64) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut collection = self.store.load().await?;
        let Some(index) = collection.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        collection.remove(index);
        self.store.save(&collection).await?;

        tracing::info!(id, "deleted pokemon");
        Ok(true)
    }
}

/// Next id: one past the current maximum; gaps are never reused
pub fn next_id(collection: &[Pokemon]) -> u64 {
    collection.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}
