//! # Pokemon API
//!
//! A REST service for managing a Pokemon catalog persisted as a single JSON
//! document.
//!
//! ## Features
//!
//! - **CRUD over HTTP**: list (paginated), get, create, update, delete
//! - **Uniform envelopes**: `{success, data, message}` on success and
//!   `{success: false, message, errors?, error?}` on failure
//! - **Field-level validation**: every problem in a payload is reported at once
//! - **Pluggable storage**: JSON file with atomic replace, or in-memory
//! - **Configuration**: defaults, optional YAML file, environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pokemon_api::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let store = JsonFileStore::open(&config.data_file).await?;
//!
//!     ServerBuilder::new()
//!         .with_config(config)
//!         .with_store(store)
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::{Characteristics, Pokemon, PokemonAttributes, PokemonPatch},
        error::{ApiError, ApiResult, EntityError, RequestError, StorageError, ValidationError},
        query::{ListParams, PageRequest, Pagination, PokemonPage},
        response::ApiResponse,
        service::PokemonService,
        store::PokemonStore,
        validation::{PokemonId, ValidatedPatch, ValidatedPokemon},
    };

    // === Storage ===
    pub use crate::storage::{InMemoryStore, JsonFileStore};

    // === Config ===
    pub use crate::config::{Environment, ServerConfig};

    // === Server ===
    pub use crate::server::{AppState, RestExposure, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};

    // === Axum ===
    pub use axum::{
        Router,
        routing::{delete, get, post, put},
    };
}
