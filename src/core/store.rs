//! Store trait for durable access to the Pokemon collection

use crate::core::entity::Pokemon;
use crate::core::error::StorageError;
use async_trait::async_trait;
use std::collections::HashSet;

/// Whole-document persistence for the catalog
///
/// A store reads and writes the *entire* collection at once; there are no
/// partial writes. Implementations only guarantee that a single `save` is
/// atomic. Serializing load/mutate/save cycles is the caller's job
/// (see [`PokemonService`](crate::core::service::PokemonService)).
#[async_trait]
pub trait PokemonStore: Send + Sync {
    /// Load the full collection, in insertion order
    ///
    /// # Errors
    /// [`StorageError::Read`] if the medium is unreadable or the content is
    /// not a well-formed collection.
    async fn load(&self) -> Result<Vec<Pokemon>, StorageError>;

    /// Replace the full collection
    ///
    /// # Errors
    /// [`StorageError::Write`] if the medium could not be written.
    async fn save(&self, collection: &[Pokemon]) -> Result<(), StorageError>;
}

/// Check the collection invariant: every id is a unique positive integer
pub fn check_ids(collection: &[Pokemon]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(collection.len());
    for pokemon in collection {
        if pokemon.id == 0 {
            return Err(format!("Pokemon '{}' has id 0", pokemon.name()));
        }
        if !seen.insert(pokemon.id) {
            return Err(format!("duplicate Pokemon id {}", pokemon.id));
        }
    }
    Ok(())
}
