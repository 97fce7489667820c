//! In-memory implementation of PokemonStore for testing and development

use crate::core::entity::Pokemon;
use crate::core::error::StorageError;
use crate::core::store::{PokemonStore, check_ids};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

const LOCATION: &str = "memory";

/// In-memory store implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pokemon: Arc<RwLock<Vec<Pokemon>>>,
}

impl InMemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `pokemon`
    pub fn with_pokemon(pokemon: Vec<Pokemon>) -> Self {
        Self {
            pokemon: Arc::new(RwLock::new(pokemon)),
        }
    }
}

#[async_trait]
impl PokemonStore for InMemoryStore {
    async fn load(&self) -> Result<Vec<Pokemon>, StorageError> {
        let pokemon = self
            .pokemon
            .read()
            .map_err(|e| StorageError::read(LOCATION, format!("Failed to acquire read lock: {}", e)))?;

        check_ids(&pokemon).map_err(|e| StorageError::read(LOCATION, e))?;
        Ok(pokemon.clone())
    }

    async fn save(&self, collection: &[Pokemon]) -> Result<(), StorageError> {
        let mut pokemon = self.pokemon.write().map_err(|e| {
            StorageError::write(LOCATION, format!("Failed to acquire write lock: {}", e))
        })?;

        *pokemon = collection.to_vec();
        Ok(())
    }
}
