//! Router builder for the catalog routes

use crate::server::exposure::rest::handlers::{
    AppState, create_pokemon, delete_pokemon, endpoint_not_found, get_pokemon, list_pokemon,
    update_pokemon,
};
use axum::{Router, routing::get};

/// Build the catalog routes
///
/// - GET /pokemon - List one page of Pokemon
/// - POST /pokemon - Create a Pokemon
/// - GET /pokemon/{id} - Get a Pokemon
/// - PUT /pokemon/{id} - Update a Pokemon
/// - DELETE /pokemon/{id} - Delete a Pokemon
///
/// Unsupported methods on these paths answer like unknown routes.
pub fn build_pokemon_routes(state: AppState) -> Router {
    Router::new()
        .route("/pokemon", get(list_pokemon).post(create_pokemon))
        .route(
            "/pokemon/{id}",
            get(get_pokemon).put(update_pokemon).delete(delete_pokemon),
        )
        .method_not_allowed_fallback(endpoint_not_found)
        .with_state(state)
}
