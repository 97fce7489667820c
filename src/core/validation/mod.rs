//! Request validation
//!
//! Pure validation functions live in [`validators`]; [`extractor`] wires them
//! into axum so that handlers only ever see well-typed input.

pub mod extractor;
pub mod validators;

pub use extractor::{PokemonId, ValidatedPatch, ValidatedPokemon};
pub use validators::{validate_id, validate_pokemon_patch, validate_pokemon_payload};
