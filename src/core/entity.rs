//! Typed records for the Pokemon catalog
//!
//! A stored [`Pokemon`] is an `id` plus a set of [`PokemonAttributes`]. The
//! attributes are what clients send on create; a [`PokemonPatch`] is what they
//! send on update. Fields the catalog does not model explicitly are kept in a
//! flattened `extra` map so that loading and saving a document never drops
//! data. On load, an optional field whose stored value does not fit its type
//! is kept verbatim in `extra` as well, so one loosely typed record does not
//! make the whole catalog unreadable.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A single catalog record as persisted and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    /// System-assigned identifier, immutable after creation
    pub id: u64,

    #[serde(flatten)]
    pub attributes: PokemonAttributes,
}

impl Pokemon {
    /// Build a stored record from validated attributes and an assigned id
    pub fn new(id: u64, attributes: PokemonAttributes) -> Self {
        Self { id, attributes }
    }

    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    /// Overwrite every field supplied by the patch, leaving the id untouched
    pub fn apply(&mut self, patch: PokemonPatch) {
        self.attributes.apply(patch);
    }
}

/// Everything about a Pokemon except its identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredAttributes")]
pub struct PokemonAttributes {
    pub name: String,

    /// Elemental types, in display order (e.g. `["Grass", "Poison"]`)
    #[serde(rename = "type")]
    pub types: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub characteristics: Option<Characteristics>,

    /// Unmodelled or mistyped fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PokemonAttributes {
    /// Minimal attributes: a name and its types
    pub fn new(name: impl Into<String>, types: Vec<String>) -> Self {
        Self {
            name: name.into(),
            types,
            hp: None,
            attack: None,
            defense: None,
            speed: None,
            description: None,
            characteristics: None,
            extra: Map::new(),
        }
    }

    fn apply(&mut self, patch: PokemonPatch) {
        let PokemonPatch {
            name,
            types,
            hp,
            attack,
            defense,
            speed,
            description,
            characteristics,
            extra,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(types) = types {
            self.types = types;
        }
        if hp.is_some() {
            self.hp = hp;
            self.extra.remove("hp");
        }
        if attack.is_some() {
            self.attack = attack;
            self.extra.remove("attack");
        }
        if defense.is_some() {
            self.defense = defense;
            self.extra.remove("defense");
        }
        if speed.is_some() {
            self.speed = speed;
            self.extra.remove("speed");
        }
        if description.is_some() {
            self.description = description;
            self.extra.remove("description");
        }
        if characteristics.is_some() {
            self.characteristics = characteristics;
            self.extra.remove("characteristics");
        }
        self.extra.extend(extra);
    }
}

/// Wire form of [`PokemonAttributes`]: only `name` and `type` are strict
#[derive(Deserialize)]
struct StoredAttributes {
    name: String,

    #[serde(rename = "type")]
    types: Vec<String>,

    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl From<StoredAttributes> for PokemonAttributes {
    fn from(stored: StoredAttributes) -> Self {
        let mut extra = stored.rest;
        Self {
            name: stored.name,
            types: stored.types,
            hp: take_typed(&mut extra, "hp"),
            attack: take_typed(&mut extra, "attack"),
            defense: take_typed(&mut extra, "defense"),
            speed: take_typed(&mut extra, "speed"),
            description: take_typed(&mut extra, "description"),
            characteristics: take_typed(&mut extra, "characteristics"),
            extra,
        }
    }
}

/// Move `key` out of `extra` only if its value parses as `T`
fn take_typed<T: DeserializeOwned>(extra: &mut Map<String, Value>, key: &str) -> Option<T> {
    let parsed = T::deserialize(extra.get(key)?).ok()?;
    extra.remove(key);
    Some(parsed)
}

/// Physical traits of a Pokemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Characteristics {
    /// Free-form height, e.g. `"0.7 m"`
    pub height: String,

    /// Free-form weight, e.g. `"6.9 kg"`
    pub weight: String,

    /// Non-negative; kept as the exact JSON number the client sent
    pub base_experience: Number,

    pub abilities: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial update payload
///
/// Every field is optional; `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PokemonPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characteristics: Option<Characteristics>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PokemonPatch {
    /// Patch that only renames
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
