//! JSON file storage backend
//!
//! The whole catalog lives in one pretty-printed JSON array. Reads parse the
//! file in full; writes go to a uniquely named temporary file in the same
//! directory which is then renamed over the target, so readers observe either
//! the old document or the new one, never a torn write.
//!
//! All I/O goes through `tokio::fs`: a request waiting on the disk does not
//! block the others.

use crate::core::entity::Pokemon;
use crate::core::error::StorageError;
use crate::core::store::{PokemonStore, check_ids};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// File-backed implementation of [`PokemonStore`]
///
/// # Example
///
/// ```rust,ignore
/// use pokemon_api::storage::JsonFileStore;
///
/// let store = JsonFileStore::open("data/pokemon.json").await?;
/// let pokemon = store.load().await?;
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Use `path` as-is; the file must already exist for `load` to succeed
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `path`, creating parent directories and an empty catalog if needed
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let store = Self::new(path);

        if let Some(parent) = store.parent_dir() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::write(store.location(), e))?;
        }

        let exists = fs::try_exists(&store.path)
            .await
            .map_err(|e| StorageError::read(store.location(), e))?;
        if !exists {
            tracing::info!(path = %store.path.display(), "creating empty pokemon catalog");
            store.save(&[]).await?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "pokemon.json".to_string());
        let tmp_name = format!(".{}.{}.tmp", file_name, Uuid::new_v4());

        match self.parent_dir() {
            Some(parent) => parent.join(tmp_name),
            None => PathBuf::from(tmp_name),
        }
    }
}

#[async_trait]
impl PokemonStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Pokemon>, StorageError> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "failed to read pokemon data");
            StorageError::read(self.location(), e)
        })?;

        let collection: Vec<Pokemon> = serde_json::from_str(&content).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "pokemon data is not valid");
            StorageError::read(self.location(), e)
        })?;

        check_ids(&collection).map_err(|e| StorageError::read(self.location(), e))?;

        tracing::debug!(count = collection.len(), "loaded pokemon catalog");
        Ok(collection)
    }

    async fn save(&self, collection: &[Pokemon]) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(collection)
            .map_err(|e| StorageError::write(self.location(), e))?;

        let tmp_path = self.temp_path();

        if let Err(e) = fs::write(&tmp_path, content).await {
            let _ = fs::remove_file(&tmp_path).await;
            tracing::error!(path = %tmp_path.display(), error = %e, "failed to write temp file");
            return Err(StorageError::write(self.location(), e));
        }

        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            tracing::error!(path = %self.path.display(), error = %e, "failed to replace pokemon data");
            return Err(StorageError::write(self.location(), e));
        }

        tracing::debug!(count = collection.len(), "saved pokemon catalog");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::PokemonAttributes;
    use tempfile::TempDir;

    fn mon(id: u64, name: &str) -> Pokemon {
        Pokemon::new(id, PokemonAttributes::new(name, vec!["Fire".to_string()]))
    }

    #[tokio::test]
    async fn test_open_creates_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("pokemon.json");

        let store = JsonFileStore::open(&path).await.unwrap();

        assert!(path.exists());
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pokemon.json");
        std::fs::write(&path, r#"[{"id": 4, "name": "Charmander", "type": ["Fire"]}]"#).unwrap();

        let store = JsonFileStore::open(&path).await.unwrap();
        let collection = store.load().await.unwrap();

        assert_eq!(collection.len(), 1);
        assert_eq!(collection[0].name(), "Charmander");
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("pokemon.json")).await.unwrap();

        let collection = vec![mon(1, "Charmander"), mon(2, "Charmeleon")];
        store.save(&collection).await.unwrap();

        assert_eq!(store.load().await.unwrap(), collection);
    }

    #[tokio::test]
    async fn test_save_is_pretty_printed_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pokemon.json");
        let store = JsonFileStore::open(&path).await.unwrap();

        store.save(&[mon(1, "Vulpix")]).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  {"));
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
    }

    #[tokio::test]
    async fn test_load_garbage_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pokemon.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
    }

    #[tokio::test]
    async fn test_load_duplicate_ids_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pokemon.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "A", "type": ["Ice"]}, {"id": 1, "name": "B", "type": ["Ice"]}]"#,
        )
        .unwrap();

        let err = JsonFileStore::new(&path).load().await.unwrap_err();
        assert!(err.detail().contains("duplicate"));
    }

    #[tokio::test]
    async fn test_loosely_typed_record_loads_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pokemon.json");
        let document = serde_json::json!([
            {"id": 1, "name": "Bulbasaur", "type": ["Grass"], "hp": 45},
            {"id": 2, "name": "Ivysaur", "type": ["Grass"], "hp": "60", "description": 7},
            {"id": 3, "name": "Venusaur", "type": ["Grass"], "characteristics": {"height": "2.0 m"}}
        ]);
        std::fs::write(&path, document.to_string()).unwrap();

        let store = JsonFileStore::new(&path);
        let collection = store.load().await.unwrap();
        assert_eq!(collection.len(), 3);
        assert_eq!(collection[0].attributes.hp, Some(45));

        store.save(&collection).await.unwrap();
        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, document);
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_is_write_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("gone").join("pokemon.json"));

        let err = store.save(&[]).await.unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }
}
