//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses are properly formatted
//! - Storage failures surface as 500s with diagnostic detail outside production
//! - Handler panics become the generic 500 envelope

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_test::TestServer;
use pokemon_api::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_validation_error_returns_400() {
        let err = ApiError::from(ValidationError::single("Name is required"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_id_returns_400() {
        let err = ApiError::from(RequestError::InvalidId {
            value: "abc".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_malformed_json_returns_400() {
        let err = ApiError::from(RequestError::MalformedJson {
            message: "EOF while parsing".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_returns_404() {
        let err = ApiError::from(EntityError::NotFound { id: 7 });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ApiError::from(RequestError::EndpointNotFound {
            method: "GET".to_string(),
            path: "/nowhere".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_errors_return_500() {
        let read = ApiError::from(StorageError::read("data/pokemon.json", "permission denied"));
        let write = ApiError::from(StorageError::write("data/pokemon.json", "disk full"));
        assert_eq!(read.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(write.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::internal("boom").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Error Response Format Tests
// =============================================================================

mod response_format_tests {
    use super::*;

    #[test]
    fn test_validation_envelope_lists_errors() {
        let err = ApiError::from(ValidationError::new(vec![
            "Name is required and must be a non-empty string".to_string(),
            "Hp must be an integer".to_string(),
        ]));

        let body = serde_json::to_value(err.to_response(false)).unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "message": "Validation failed",
                "errors": [
                    "Name is required and must be a non-empty string",
                    "Hp must be an integer"
                ]
            })
        );
    }

    #[test]
    fn test_storage_detail_is_hidden_unless_exposed() {
        let err = ApiError::from(StorageError::read("data/pokemon.json", "unexpected EOF"));

        let hidden = serde_json::to_value(err.to_response(false)).unwrap();
        assert_eq!(hidden["message"], "Error reading Pokemon data");
        assert!(hidden.get("error").is_none());

        let exposed = serde_json::to_value(err.to_response(true)).unwrap();
        assert!(exposed["error"].as_str().unwrap().contains("unexpected EOF"));
    }

    #[tokio::test]
    async fn test_into_response_sets_status() {
        let response = ApiError::from(EntityError::NotFound { id: 3 }).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

// =============================================================================
// Storage Failure Tests
// =============================================================================

/// Store whose writes can be made to fail
struct FlakyStore {
    inner: InMemoryStore,
    fail_writes: Arc<AtomicBool>,
}

#[async_trait]
impl PokemonStore for FlakyStore {
    async fn load(&self) -> Result<Vec<Pokemon>, StorageError> {
        self.inner.load().await
    }

    async fn save(&self, collection: &[Pokemon]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::write("flaky", "simulated disk failure"));
        }
        self.inner.save(collection).await
    }
}

fn server(store: impl PokemonStore + 'static, environment: Environment) -> TestServer {
    let config = ServerConfig {
        environment,
        ..ServerConfig::default()
    };
    let app = ServerBuilder::new()
        .with_config(config)
        .with_store(store)
        .build()
        .unwrap();
    TestServer::try_new(app).unwrap()
}

fn corrupt_store(dir: &TempDir) -> JsonFileStore {
    let path = dir.path().join("pokemon.json");
    std::fs::write(&path, "[{\"id\": 1, \"name\": ").unwrap();
    JsonFileStore::new(path)
}

fn pikachu() -> Value {
    json!({
        "name": "Pikachu",
        "description": "Electric mouse",
        "characteristics": {
            "height": "0.4 m",
            "weight": "6 kg",
            "base_experience": 112,
            "abilities": ["Static"]
        },
        "type": ["Electric"]
    })
}

mod storage_failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_corrupt_file_is_500_without_detail_in_production() {
        let dir = TempDir::new().unwrap();
        let server = server(corrupt_store(&dir), Environment::Production);

        let response = server.get("/api/pokemon").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Error reading Pokemon data");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_500_with_detail_in_development() {
        let dir = TempDir::new().unwrap();
        let server = server(corrupt_store(&dir), Environment::Development);

        let response = server.get("/api/pokemon/1").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["message"], "Error reading Pokemon data");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_failed_write_is_500_and_leaves_catalog_unchanged() {
        let fail_writes = Arc::new(AtomicBool::new(false));
        let store = FlakyStore {
            inner: InMemoryStore::new(),
            fail_writes: fail_writes.clone(),
        };
        let server = server(store, Environment::Development);

        server
            .post("/api/pokemon")
            .json(&pikachu())
            .await
            .assert_status(StatusCode::CREATED);

        fail_writes.store(true, Ordering::SeqCst);
        let response = server.post("/api/pokemon").json(&pikachu()).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["message"], "Error saving Pokemon data");
        assert!(body["error"].as_str().unwrap().contains("simulated disk failure"));

        let list: Value = server.get("/api/pokemon").await.json();
        assert_eq!(list["data"]["pagination"]["totalItems"], 1);
    }

    #[tokio::test]
    async fn test_client_errors_are_unaffected_by_environment() {
        let server = server(InMemoryStore::new(), Environment::Development);

        let response = server.get("/api/pokemon/abc").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(
            body,
            json!({ "success": false, "message": "Invalid ID. Must be a positive number" })
        );
    }
}

// =============================================================================
// Panic Recovery Tests
// =============================================================================

mod panic_recovery_tests {
    use super::*;

    async fn exploding_handler() -> &'static str {
        panic!("exploding handler")
    }

    fn panicking_server(environment: Environment) -> TestServer {
        let config = ServerConfig {
            environment,
            ..ServerConfig::default()
        };
        let app = ServerBuilder::new()
            .with_config(config)
            .with_store(InMemoryStore::new())
            .with_custom_routes(Router::new().route("/explode", get(exploding_handler)))
            .build()
            .unwrap();
        TestServer::try_new(app).unwrap()
    }

    #[tokio::test]
    async fn test_panic_becomes_generic_500_in_production() {
        let server = panicking_server(Environment::Production);

        let response = server.get("/explode").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(
            body,
            json!({ "success": false, "message": "Internal server error" })
        );
    }

    #[tokio::test]
    async fn test_panic_detail_is_exposed_in_development() {
        let server = panicking_server(Environment::Development);

        let response = server.get("/explode").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["error"], "exploding handler");
    }

    #[tokio::test]
    async fn test_server_keeps_serving_after_a_panic() {
        let server = panicking_server(Environment::Production);

        server.get("/explode").await.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        server.get("/health").await.assert_status_ok();
    }
}
