//! REST API exposure
//!
//! Consumes an [`AppState`] plus the [`ServerConfig`] and produces the Axum
//! `Router` that is actually served: catalog routes under the configured
//! prefix, a welcome route, health checks, the OpenAPI document, the 404
//! fallback, panic recovery, and the CORS / request-logging layers.

pub mod handlers;
pub mod openapi;

use crate::config::ServerConfig;
use crate::core::error::ApiError;
use crate::server::router::build_pokemon_routes;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, middleware, routing::get};
use std::any::Any;
use handlers::{AppState, endpoint_not_found};
use serde_json::{Value, json};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router
    ///
    /// # Arguments
    ///
    /// * `state` - Shared handler state (the catalog service)
    /// * `config` - Server configuration (prefix, environment)
    /// * `custom_routes` - Additional routes to merge
    pub fn build_router(state: AppState, config: &ServerConfig, custom_routes: Vec<Router>) -> Router {
        let prefix = config.normalized_prefix();
        let pokemon_routes = build_pokemon_routes(state);

        let mut app = Self::info_routes(&prefix);
        app = if prefix.is_empty() {
            app.merge(pokemon_routes)
        } else {
            app.nest(&prefix, pokemon_routes)
        };

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app = app
            .fallback(endpoint_not_found)
            .method_not_allowed_fallback(endpoint_not_found)
            .layer(CatchPanicLayer::custom(panic_response));

        if config.environment.exposes_error_details() {
            app = app.layer(middleware::map_response(attach_diagnostics));
        }

        app.layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Welcome, health and documentation routes
    fn info_routes(prefix: &str) -> Router {
        let welcome = welcome_document(prefix);
        let docs = openapi::openapi_document(prefix);

        Router::new()
            .route("/", get(move || async move { Json(welcome) }))
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
            .route("/api-docs.json", get(move || async move { Json(docs) }))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": env!("CARGO_PKG_NAME")
        }))
    }
}

fn welcome_document(prefix: &str) -> Value {
    json!({
        "success": true,
        "message": "Welcome to Pokemon API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "getAll": format!("GET {}/pokemon", prefix),
            "getById": format!("GET {}/pokemon/:id", prefix),
            "create": format!("POST {}/pokemon", prefix),
            "update": format!("PUT {}/pokemon/:id", prefix),
            "delete": format!("DELETE {}/pokemon/:id", prefix)
        },
        "documentation": "/api-docs.json"
    })
}

/// Turn a handler panic into the generic 500 envelope
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };
    ApiError::internal(detail).into_response()
}

/// Re-render error responses with their internal cause attached
///
/// Only installed outside production.
async fn attach_diagnostics(response: Response) -> Response {
    match response.extensions().get::<ApiError>() {
        Some(err) => err.clone().render(true),
        None => response,
    }
}
