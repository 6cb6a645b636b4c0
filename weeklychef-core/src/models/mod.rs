mod category;
mod ingredient;
mod nutrition;
mod preferences;
mod recipe;

pub use category::{IngredientCategory, RecipeCategory};
pub use ingredient::Ingredient;
pub use nutrition::NutritionInfo;
pub use preferences::{BudgetRange, CookingSkillLevel, DietaryRestriction, UserPreferences};
pub use recipe::{Difficulty, Recipe, RecipeIngredient};
