//! Core module containing the catalog types, service and error contract

pub mod entity;
pub mod error;
pub mod query;
pub mod response;
pub mod service;
pub mod store;
pub mod validation;

pub use entity::{Characteristics, Pokemon, PokemonAttributes, PokemonPatch};
pub use error::{ApiError, ApiResult, EntityError, RequestError, StorageError, ValidationError};
pub use query::{ListParams, PageRequest, Pagination, PokemonPage};
pub use response::ApiResponse;
pub use service::PokemonService;
pub use store::PokemonStore;
