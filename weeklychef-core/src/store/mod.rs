//! On-device persistence of the ingredient snapshot and last-known
//! preferences.
//!
//! Saves overwrite the previous snapshot wholesale; there is no partial
//! update or merge.

mod file;
mod memory;

pub use file::{JsonFileStore, INGREDIENTS_FILE, PREFERENCES_FILE};
pub use memory::MemoryStore;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{Ingredient, UserPreferences};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait LocalStore: Send + Sync {
    /// Replaces the stored ingredient snapshot.
    fn save_ingredients(&self, ingredients: &[Ingredient]) -> Result<(), StoreError>;

    /// Returns `None` when no snapshot has ever been saved.
    fn load_ingredients(&self) -> Result<Option<Vec<Ingredient>>, StoreError>;

    fn save_preferences(&self, preferences: &UserPreferences) -> Result<(), StoreError>;

    fn load_preferences(&self) -> Result<Option<UserPreferences>, StoreError>;
}
