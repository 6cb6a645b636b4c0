use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{LocalStore, StoreError};
use crate::models::{Ingredient, UserPreferences};

pub const INGREDIENTS_FILE: &str = "ingredients.json";
pub const PREFERENCES_FILE: &str = "preferences.json";

/// JSON files under a data directory, one file per key.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    pub fn exists(&self, file_name: &str) -> bool {
        self.path(file_name).exists()
    }

    fn read<T: DeserializeOwned>(&self, file_name: &str) -> Result<Option<T>, StoreError> {
        let path = self.path(file_name);

        match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|source| StoreError::Decode { path, source }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Creates the data directory if it doesn't exist.
    fn write<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir).map_err(|source| StoreError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        let path = self.path(file_name);
        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(&path, bytes).map_err(|source| StoreError::Io { path, source })
    }
}

impl LocalStore for JsonFileStore {
    fn save_ingredients(&self, ingredients: &[Ingredient]) -> Result<(), StoreError> {
        self.write(INGREDIENTS_FILE, ingredients)
    }

    fn load_ingredients(&self) -> Result<Option<Vec<Ingredient>>, StoreError> {
        self.read(INGREDIENTS_FILE)
    }

    fn save_preferences(&self, preferences: &UserPreferences) -> Result<(), StoreError> {
        self.write(PREFERENCES_FILE, preferences)
    }

    fn load_preferences(&self) -> Result<Option<UserPreferences>, StoreError> {
        self.read(PREFERENCES_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetRange, IngredientCategory};
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn test_store() -> (JsonFileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_store_path() {
        let (store, _temp) = test_store();
        assert!(store.path(INGREDIENTS_FILE).ends_with("ingredients.json"));
    }

    #[test]
    fn test_load_nonexistent_returns_none() {
        let (store, _temp) = test_store();
        assert!(store.load_ingredients().unwrap().is_none());
        assert!(store.load_preferences().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_dir = temp_dir.path().join("nested").join("data");
        let store = JsonFileStore::new(nested_dir.clone());

        store.save_ingredients(&[]).unwrap();

        assert!(nested_dir.exists());
        assert!(store.exists(INGREDIENTS_FILE));
    }

    #[test]
    fn test_empty_snapshot_is_distinct_from_missing() {
        let (store, _temp) = test_store();
        store.save_ingredients(&[]).unwrap();
        assert_eq!(store.load_ingredients().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_ingredients_keep_every_field() {
        let (store, _temp) = test_store();
        let now = Utc::now();
        let ingredients = vec![
            Ingredient::new("番茄", 3.0, "个", IngredientCategory::Vegetables)
                .with_purchase_date(now - Duration::days(1))
                .with_expiration_date(now + Duration::days(4)),
            Ingredient::new("盐", 1.0, "kg", IngredientCategory::Condiments),
        ];

        store.save_ingredients(&ingredients).unwrap();
        let loaded = store.load_ingredients().unwrap().unwrap();

        assert_eq!(loaded, ingredients);
        assert_eq!(loaded[0].id(), ingredients[0].id());
        assert!(loaded[1].expiration_date.is_none());
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let (store, _temp) = test_store();
        let first = vec![Ingredient::new("a", 1.0, "", IngredientCategory::Other)];
        let second = vec![Ingredient::new("b", 2.0, "", IngredientCategory::Other)];

        store.save_ingredients(&first).unwrap();
        store.save_ingredients(&second).unwrap();

        let loaded = store.load_ingredients().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "b");
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let (store, _temp) = test_store();
        fs::write(store.path(INGREDIENTS_FILE), b"{not json").unwrap();

        let err = store.load_ingredients().unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
        assert!(err.to_string().contains("Failed to decode"));
    }

    #[test]
    fn test_preferences_roundtrip() {
        let (store, _temp) = test_store();
        let mut prefs = UserPreferences::default();
        prefs.budget_range = BudgetRange::Low;
        prefs.allergies.push("花生".to_string());

        store.save_preferences(&prefs).unwrap();
        assert_eq!(store.load_preferences().unwrap(), Some(prefs));
    }
}
