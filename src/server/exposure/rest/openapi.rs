//! OpenAPI 3 description of the REST surface, served at `/api-docs.json`

use serde_json::{Value, json};

/// Build the OpenAPI document for routes mounted under `prefix`
pub fn openapi_document(prefix: &str) -> Value {
    let collection = format!("{}/pokemon", prefix);
    let item = format!("{}/pokemon/{{id}}", prefix);
    let id_param = json!({
        "in": "path",
        "name": "id",
        "required": true,
        "schema": { "type": "integer", "minimum": 1 },
        "description": "Pokemon ID"
    });

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Pokemon API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "RESTful API for Pokemon management"
        },
        "tags": [{ "name": "Pokemon", "description": "Pokemon management endpoints" }],
        "paths": {
            collection: {
                "get": {
                    "summary": "Get all Pokemon",
                    "tags": ["Pokemon"],
                    "parameters": [
                        {
                            "in": "query",
                            "name": "page",
                            "schema": { "type": "integer", "minimum": 1, "default": 1 }
                        },
                        {
                            "in": "query",
                            "name": "limit",
                            "schema": { "type": "integer", "minimum": 1, "maximum": 100, "default": 20 }
                        }
                    ],
                    "responses": {
                        "200": response("List of Pokemon retrieved successfully", json!({
                            "type": "object",
                            "properties": {
                                "pokemon": { "type": "array", "items": schema_ref("Pokemon") },
                                "pagination": schema_ref("Pagination")
                            }
                        })),
                        "500": error_response("Server error")
                    }
                },
                "post": {
                    "summary": "Create a new Pokemon",
                    "tags": ["Pokemon"],
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": schema_ref("PokemonInput") } }
                    },
                    "responses": {
                        "201": response("Pokemon created successfully", schema_ref("Pokemon")),
                        "400": error_response("Validation failed or invalid JSON"),
                        "500": error_response("Server error")
                    }
                }
            },
            item: {
                "get": {
                    "summary": "Get a Pokemon by ID",
                    "tags": ["Pokemon"],
                    "parameters": [id_param.clone()],
                    "responses": {
                        "200": response("Pokemon retrieved successfully", schema_ref("Pokemon")),
                        "400": error_response("Invalid ID"),
                        "404": error_response("Pokemon not found"),
                        "500": error_response("Server error")
                    }
                },
                "put": {
                    "summary": "Update an existing Pokemon",
                    "tags": ["Pokemon"],
                    "parameters": [id_param.clone()],
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": schema_ref("PokemonPatch") } }
                    },
                    "responses": {
                        "200": response("Pokemon updated successfully", schema_ref("Pokemon")),
                        "400": error_response("Invalid ID, invalid field or invalid JSON"),
                        "404": error_response("Pokemon not found"),
                        "500": error_response("Server error")
                    }
                },
                "delete": {
                    "summary": "Delete a Pokemon",
                    "tags": ["Pokemon"],
                    "parameters": [id_param],
                    "responses": {
                        "200": {
                            "description": "Pokemon deleted successfully",
                            "content": { "application/json": { "schema": schema_ref("SuccessResponse") } }
                        },
                        "400": error_response("Invalid ID"),
                        "404": error_response("Pokemon not found"),
                        "500": error_response("Server error")
                    }
                }
            }
        },
        "components": { "schemas": schemas() }
    })
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{}", name) })
}

fn response(description: &str, data: Value) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean", "example": true },
                        "data": data,
                        "message": { "type": "string" }
                    }
                }
            }
        }
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema_ref("ErrorResponse") } }
    })
}

fn schemas() -> Value {
    let characteristics = json!({
        "type": "object",
        "required": ["height", "weight", "base_experience", "abilities"],
        "properties": {
            "height": { "type": "string", "example": "0.4 m" },
            "weight": { "type": "string", "example": "6 kg" },
            "base_experience": { "type": "number", "minimum": 0, "example": 112 },
            "abilities": { "type": "array", "items": { "type": "string" }, "example": ["Static"] }
        }
    });
    let fields = json!({
        "name": { "type": "string", "example": "Pikachu" },
        "type": { "type": "array", "items": { "type": "string" }, "example": ["Electric"] },
        "hp": { "type": "integer", "example": 35 },
        "attack": { "type": "integer", "example": 55 },
        "defense": { "type": "integer", "example": 40 },
        "speed": { "type": "integer", "example": 90 },
        "description": { "type": "string" },
        "characteristics": characteristics
    });

    let mut pokemon_fields = fields.clone();
    pokemon_fields["id"] = json!({ "type": "integer", "description": "Pokemon ID (auto-generated)", "example": 25 });

    json!({
        "Pokemon": {
            "type": "object",
            "required": ["id", "name", "type"],
            "properties": pokemon_fields
        },
        "PokemonInput": {
            "type": "object",
            "required": ["name", "description", "characteristics", "type"],
            "properties": fields.clone()
        },
        "PokemonPatch": {
            "type": "object",
            "properties": fields
        },
        "Pagination": {
            "type": "object",
            "properties": {
                "currentPage": { "type": "integer" },
                "itemsPerPage": { "type": "integer" },
                "totalItems": { "type": "integer" },
                "totalPages": { "type": "integer" },
                "hasNextPage": { "type": "boolean" },
                "hasPreviousPage": { "type": "boolean" }
            }
        },
        "SuccessResponse": {
            "type": "object",
            "properties": {
                "success": { "type": "boolean", "example": true },
                "data": { "type": "object" },
                "message": { "type": "string" }
            }
        },
        "ErrorResponse": {
            "type": "object",
            "properties": {
                "success": { "type": "boolean", "example": false },
                "message": { "type": "string" },
                "errors": { "type": "array", "items": { "type": "string" } },
                "error": { "type": "string" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_prefix() {
        let doc = openapi_document("/api");
        assert!(doc["paths"]["/api/pokemon"]["get"].is_object());
        assert!(doc["paths"]["/api/pokemon/{id}"]["delete"].is_object());
    }

    #[test]
    fn test_input_schema_lists_required_fields() {
        let doc = openapi_document("");
        let required = &doc["components"]["schemas"]["PokemonInput"]["required"];
        assert_eq!(required.as_array().unwrap().len(), 4);
        assert!(doc["paths"]["/pokemon"].is_object());
    }
}
