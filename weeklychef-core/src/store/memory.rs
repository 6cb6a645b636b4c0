use std::sync::Mutex;

use super::{LocalStore, StoreError};
use crate::models::{Ingredient, UserPreferences};

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ingredients: Mutex<Option<Vec<Ingredient>>>,
    preferences: Mutex<Option<UserPreferences>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an ingredient snapshot.
    pub fn with_ingredients(ingredients: Vec<Ingredient>) -> Self {
        Self {
            ingredients: Mutex::new(Some(ingredients)),
            preferences: Mutex::new(None),
        }
    }
}

impl LocalStore for MemoryStore {
    fn save_ingredients(&self, ingredients: &[Ingredient]) -> Result<(), StoreError> {
        *self.ingredients.lock().unwrap_or_else(|e| e.into_inner()) = Some(ingredients.to_vec());
        Ok(())
    }

    fn load_ingredients(&self) -> Result<Option<Vec<Ingredient>>, StoreError> {
        Ok(self
            .ingredients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    fn save_preferences(&self, preferences: &UserPreferences) -> Result<(), StoreError> {
        *self.preferences.lock().unwrap_or_else(|e| e.into_inner()) = Some(preferences.clone());
        Ok(())
    }

    fn load_preferences(&self) -> Result<Option<UserPreferences>, StoreError> {
        Ok(self
            .preferences
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }
}
