//! Axum extractors that validate requests before they reach handlers
//!
//! ```rust,ignore
//! pub async fn update_pokemon(
//!     State(state): State<AppState>,
//!     PokemonId(id): PokemonId,
//!     ValidatedPatch(patch): ValidatedPatch,
//! ) -> ApiResult<ApiResponse<Pokemon>> {
//!     // id is a positive integer, patch is well-typed
//! }
//! ```

use super::validators::{validate_id, validate_pokemon_patch, validate_pokemon_payload};
use crate::core::entity::{PokemonAttributes, PokemonPatch};
use crate::core::error::{ApiError, RequestError};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde_json::Value;

/// `{id}` path segment, parsed as a positive integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PokemonId(pub u64);

impl<S> FromRequestParts<S> for PokemonId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RequestError::InvalidId {
                value: e.body_text(),
            })?;

        Ok(PokemonId(validate_id(&raw)?))
    }
}

/// Create payload that passed [`validate_pokemon_payload`]
#[derive(Debug, Clone)]
pub struct ValidatedPokemon(pub PokemonAttributes);

impl<S> FromRequest<S> for ValidatedPokemon
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let payload = json_body(req, state).await?;
        Ok(ValidatedPokemon(validate_pokemon_payload(&payload)?))
    }
}

/// Update payload that passed [`validate_pokemon_patch`]
#[derive(Debug, Clone)]
pub struct ValidatedPatch(pub PokemonPatch);

impl<S> FromRequest<S> for ValidatedPatch
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let payload = json_body(req, state).await?;
        Ok(ValidatedPatch(validate_pokemon_patch(&payload)?))
    }
}

async fn json_body<S>(req: Request, state: &S) -> Result<Value, RequestError>
where
    S: Send + Sync,
{
    let Json(payload) = Json::<Value>::from_request(req, state)
        .await
        .map_err(|rejection| RequestError::MalformedJson {
            message: rejection.body_text(),
        })?;
    Ok(payload)
}
