//! HTTP handlers for the Pokemon catalog
//!
//! Ids and bodies are validated by extractors before these run; the handlers
//! only translate service results into envelopes (and `None`/`false` into
//! 404s).

use crate::core::entity::Pokemon;
use crate::core::error::{ApiError, ApiResult, EntityError, RequestError};
use crate::core::query::{ListParams, PokemonPage};
use crate::core::response::ApiResponse;
use crate::core::service::PokemonService;
use crate::core::validation::{PokemonId, ValidatedPatch, ValidatedPokemon};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{Method, Uri};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PokemonService>,
}

impl AppState {
    pub fn new(service: PokemonService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// GET /pokemon?page=&limit=
///
/// Unparseable query values fall back to their defaults.
pub async fn list_pokemon(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<ApiResponse<PokemonPage>> {
    let params = params.map(|Query(p)| p).unwrap_or_default();
    let page = state.service.list(params.page_request()).await?;
    Ok(ApiResponse::ok(page, "Pokemon retrieved successfully"))
}

/// GET /pokemon/{id}
pub async fn get_pokemon(
    State(state): State<AppState>,
    PokemonId(id): PokemonId,
) -> ApiResult<ApiResponse<Pokemon>> {
    let pokemon = state
        .service
        .get(id)
        .await?
        .ok_or(EntityError::NotFound { id })?;
    Ok(ApiResponse::ok(pokemon, "Pokemon retrieved successfully"))
}

/// POST /pokemon
pub async fn create_pokemon(
    State(state): State<AppState>,
    ValidatedPokemon(attributes): ValidatedPokemon,
) -> ApiResult<ApiResponse<Pokemon>> {
    let pokemon = state.service.create(attributes).await?;
    Ok(ApiResponse::created(pokemon, "Pokemon created successfully"))
}

/// PUT /pokemon/{id}
pub async fn update_pokemon(
    State(state): State<AppState>,
    PokemonId(id): PokemonId,
    ValidatedPatch(patch): ValidatedPatch,
) -> ApiResult<ApiResponse<Pokemon>> {
    let pokemon = state
        .service
        .update(id, patch)
        .await?
        .ok_or(EntityError::NotFound { id })?;
    Ok(ApiResponse::ok(pokemon, "Pokemon updated successfully"))
}

/// DELETE /pokemon/{id}
pub async fn delete_pokemon(
    State(state): State<AppState>,
    PokemonId(id): PokemonId,
) -> ApiResult<ApiResponse<()>> {
    if !state.service.delete(id).await? {
        return Err(EntityError::NotFound { id }.into());
    }
    Ok(ApiResponse::message_only("Pokemon deleted successfully"))
}

/// Fallback for unknown routes and unsupported methods
pub async fn endpoint_not_found(method: Method, uri: Uri) -> ApiError {
    RequestError::EndpointNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
    .into()
}
