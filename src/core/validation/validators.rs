//! Validation rules for path ids and Pokemon payloads
//!
//! Each function takes untyped input and returns either a typed value or a
//! [`ValidationError`] listing *every* violation found, in field order.

use crate::core::entity::{PokemonAttributes, PokemonPatch};
use crate::core::error::{RequestError, ValidationError};
use serde_json::{Map, Value};

const STATS: [(&str, &str); 4] = [
    ("hp", "Hp"),
    ("attack", "Attack"),
    ("defense", "Defense"),
    ("speed", "Speed"),
];

/// Parse a path identifier; it must be an integer greater than zero
pub fn validate_id(raw: &str) -> Result<u64, RequestError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .and_then(|id| u64::try_from(id).ok())
        .ok_or_else(|| RequestError::InvalidId {
            value: raw.to_string(),
        })
}

/// Validate a full create payload
///
/// Required: `name`, `description`, `characteristics` (with `height`,
/// `weight`, `base_experience`, `abilities`) and `type`. Stats are optional
/// but must be integers when present. A client-supplied `id` is discarded.
pub fn validate_pokemon_payload(payload: &Value) -> Result<PokemonAttributes, ValidationError> {
    let empty = Map::new();
    let fields = payload.as_object().unwrap_or(&empty);
    let mut errors = Vec::new();

    check_name(fields.get("name"), &mut errors);
    check_description(fields.get("description"), &mut errors);
    check_characteristics(fields.get("characteristics"), &mut errors);
    check_types(fields.get("type"), &mut errors);
    check_stats(fields, &mut errors);

    if !errors.is_empty() {
        return Err(ValidationError::new(errors));
    }

    let mut fields = fields.clone();
    fields.remove("id");
    serde_json::from_value(Value::Object(fields)).map_err(|e| ValidationError::single(e.to_string()))
}

/// Validate a partial update payload
///
/// Only supplied fields are checked, each against the same rule as on
/// create. `null` counts as "not supplied" and `id` is discarded.
pub fn validate_pokemon_patch(payload: &Value) -> Result<PokemonPatch, ValidationError> {
    let Some(fields) = payload.as_object() else {
        return Err(ValidationError::single("Request body must be a JSON object"));
    };

    let fields: Map<String, Value> = fields
        .iter()
        .filter(|(key, value)| key.as_str() != "id" && !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let mut errors = Vec::new();
    if let Some(name) = fields.get("name") {
        check_name(Some(name), &mut errors);
    }
    if let Some(description) = fields.get("description") {
        check_description(Some(description), &mut errors);
    }
    if let Some(characteristics) = fields.get("characteristics") {
        check_characteristics(Some(characteristics), &mut errors);
    }
    if let Some(types) = fields.get("type") {
        check_types(Some(types), &mut errors);
    }
    check_stats(&fields, &mut errors);

    if !errors.is_empty() {
        return Err(ValidationError::new(errors));
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| ValidationError::single(e.to_string()))
}

fn non_blank(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

fn non_empty(value: Option<&Value>) -> bool {
    value.and_then(Value::as_str).is_some_and(|s| !s.is_empty())
}

fn check_name(value: Option<&Value>, errors: &mut Vec<String>) {
    if !non_blank(value) {
        errors.push("Name is required and must be a non-empty string".to_string());
    }
}

fn check_description(value: Option<&Value>, errors: &mut Vec<String>) {
    if !non_blank(value) {
        errors.push("Description is required and must be a non-empty string".to_string());
    }
}

fn check_characteristics(value: Option<&Value>, errors: &mut Vec<String>) {
    let empty = Map::new();
    let characteristics = match value.and_then(Value::as_object) {
        Some(characteristics) => characteristics,
        None => {
            errors.push("Characteristics object is required".to_string());
            &empty
        }
    };

    if !non_empty(characteristics.get("height")) {
        errors.push("Characteristics.height is required and must be a string".to_string());
    }

    if !non_empty(characteristics.get("weight")) {
        errors.push("Characteristics.weight is required and must be a string".to_string());
    }

    let base_experience = characteristics.get("base_experience").and_then(Value::as_f64);
    if !base_experience.is_some_and(|xp| xp >= 0.0) {
        errors.push(
            "Characteristics.base_experience is required and must be a non-negative number"
                .to_string(),
        );
    }

    match characteristics.get("abilities").and_then(Value::as_array) {
        Some(abilities) if !abilities.is_empty() => {
            if !abilities.iter().all(Value::is_string) {
                errors.push("All abilities must be strings".to_string());
            }
        }
        _ => errors.push(
            "Characteristics.abilities is required and must be a non-empty array".to_string(),
        ),
    }
}

fn check_types(value: Option<&Value>, errors: &mut Vec<String>) {
    match value.and_then(Value::as_array) {
        Some(types) if !types.is_empty() => {
            if !types.iter().all(Value::is_string) {
                errors.push("All types must be strings".to_string());
            } else if !types.iter().all(|t| non_blank(Some(t))) {
                errors.push("Types must not be empty strings".to_string());
            }
        }
        _ => errors.push("Type is required and must be a non-empty array".to_string()),
    }
}

fn check_stats(fields: &Map<String, Value>, errors: &mut Vec<String>) {
    for (key, label) in STATS {
        match fields.get(key) {
            None | Some(Value::Null) => {}
            Some(value) if value.is_i64() => {}
            Some(_) => errors.push(format!("{label} must be an integer")),
        }
    }
}
