//! WeeklyChef Core Library
//!
//! Offline-first fridge inventory and recipe recommendations.

pub mod catalog;
pub mod coordinator;
pub mod matching;
pub mod models;
pub mod remote;
pub mod repository;
pub mod store;

pub use catalog::{sample_ingredients, RecipeCatalog};
pub use coordinator::{CoordinatorError, SyncCoordinator, SyncState};
pub use matching::{Filter, MatchReport, Recommendation, Recommendations, Tier};
pub use models::{
    BudgetRange, CookingSkillLevel, DietaryRestriction, Difficulty, Ingredient,
    IngredientCategory, NutritionInfo, Recipe, RecipeCategory, RecipeIngredient, UserPreferences,
};
pub use remote::{HttpRemoteClient, InMemoryRemote, RemoteClient, RemoteError, Session};
pub use repository::{InventoryRepository, RepositoryStatus};
pub use store::{JsonFileStore, LocalStore, MemoryStore, StoreError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
