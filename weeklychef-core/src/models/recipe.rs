use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::category::RecipeCategory;
use super::nutrition::NutritionInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "简单",
            Difficulty::Medium => "中等",
            Difficulty::Hard => "困难",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "简单" => Ok(Difficulty::Easy),
            "medium" | "中等" => Ok(Difficulty::Medium),
            "hard" | "困难" => Ok(Difficulty::Hard),
            _ => Err(format!(
                "Invalid difficulty '{}'. Valid options: easy, medium, hard",
                s
            )),
        }
    }
}

/// One line of a recipe's ingredient list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub estimated_cost: f64,
    #[serde(default)]
    pub is_optional: bool,
}

impl RecipeIngredient {
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        estimated_cost: f64,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            estimated_cost: estimated_cost.max(0.0),
            is_optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }
}

impl fmt::Display for RecipeIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{} {}", self.quantity, self.name)?;
        } else {
            write!(f, "{} {} {}", self.quantity, self.unit, self.name)?;
        }
        if self.is_optional {
            write!(f, " (optional)")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
    pub cooking_time: u32, // minutes
    pub difficulty: Difficulty,
    pub category: RecipeCategory,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    likes: u32,
    #[serde(default)]
    pub nutrition: Option<NutritionInfo>,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        cooking_time: u32,
        difficulty: Difficulty,
        category: RecipeCategory,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            cooking_time: cooking_time.max(1),
            difficulty,
            category,
            image_url: None,
            tags: Vec::new(),
            author_id: None,
            created_at: now,
            updated_at: now,
            likes: 0,
            nutrition: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<RecipeIngredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn with_instructions<S: Into<String>>(mut self, steps: impl IntoIterator<Item = S>) -> Self {
        self.instructions = steps.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the tags, dropping case-insensitive duplicates but keeping the
    /// first spelling and position of each.
    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for tag in tags.into_iter().map(Into::into) {
            if !unique.iter().any(|t| t.to_lowercase() == tag.to_lowercase()) {
                unique.push(tag);
            }
        }
        self.tags = unique;
        self
    }

    pub fn with_author(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = Some(author_id.into());
        self
    }

    pub fn with_nutrition(mut self, nutrition: NutritionInfo) -> Self {
        self.nutrition = Some(nutrition);
        self
    }

    pub fn likes(&self) -> u32 {
        self.likes
    }

    /// Records one like. There is no way to set the count directly.
    pub fn like(&mut self) -> u32 {
        self.likes = self.likes.saturating_add(1);
        self.updated_at = Utc::now();
        self.likes
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }

    pub fn total_ingredients(&self) -> usize {
        self.ingredients.len()
    }

    pub fn estimated_cost(&self) -> f64 {
        self.ingredients.iter().map(|i| i.estimated_cost).sum()
    }

    /// Non-optional ingredients in declared order.
    pub fn required_ingredients(&self) -> impl Iterator<Item = &RecipeIngredient> {
        self.ingredients.iter().filter(|i| !i.is_optional)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count().max(1) * 2))?;

        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }

        writeln!(
            f,
            "Time: {} min | Difficulty: {} | Category: {} | Likes: {}",
            self.cooking_time, self.difficulty, self.category, self.likes
        )?;
        writeln!(f, "Estimated cost: {:.2}", self.estimated_cost())?;

        if !self.tags.is_empty() {
            writeln!(f, "Tags: {}", self.tags.join(", "))?;
        }

        if !self.ingredients.is_empty() {
            writeln!(f, "\nIngredients:")?;
            for ingredient in &self.ingredients {
                writeln!(f, "  - {}", ingredient)?;
            }
        }

        if !self.instructions.is_empty() {
            writeln!(f, "\nInstructions:")?;
            for (i, step) in self.instructions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, step)?;
            }
        }

        if let Some(nutrition) = &self.nutrition {
            writeln!(f, "\nNutrition (per serving): {}", nutrition)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn omelette() -> Recipe {
        Recipe::new("番茄炒蛋", 10, Difficulty::Easy, RecipeCategory::Chinese).with_ingredients(vec![
            RecipeIngredient::new("番茄", 2.0, "个", 1.0),
            RecipeIngredient::new("鸡蛋", 3.0, "个", 0.5),
            RecipeIngredient::new("糖", 0.5, "茶匙", 0.1).optional(),
        ])
    }

    #[test]
    fn test_recipe_new() {
        let recipe = Recipe::new("Soup", 15, Difficulty::Easy, RecipeCategory::Chinese);
        assert_eq!(recipe.name, "Soup");
        assert_eq!(recipe.likes(), 0);
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.created_at, recipe.updated_at);
    }

    #[test]
    fn test_zero_cooking_time_is_raised_to_one_minute() {
        let recipe = Recipe::new("Raw", 0, Difficulty::Easy, RecipeCategory::Snack);
        assert_eq!(recipe.cooking_time, 1);
    }

    #[test]
    fn test_derived_totals() {
        let recipe = omelette();
        assert_eq!(recipe.total_ingredients(), 3);
        assert!((recipe.estimated_cost() - 1.6).abs() < 1e-9);
        let required: Vec<_> = recipe.required_ingredients().map(|i| i.name.as_str()).collect();
        assert_eq!(required, vec!["番茄", "鸡蛋"]);
    }

    #[test]
    fn test_like_increments_by_one() {
        let mut recipe = omelette();
        assert_eq!(recipe.like(), 1);
        assert_eq!(recipe.like(), 2);
        assert_eq!(recipe.likes(), 2);
    }

    #[test]
    fn test_tags_dedupe_preserves_order() {
        let recipe = omelette().with_tags(vec!["Quick", "家常菜", "quick", "Vegetarian"]);
        assert_eq!(recipe.tags, vec!["Quick", "家常菜", "Vegetarian"]);
        assert!(recipe.has_tag("QUICK"));
        assert!(!recipe.has_tag("spicy"));
    }

    #[test]
    fn test_recipe_ingredient_defaults_to_required() {
        let parsed: RecipeIngredient = serde_json::from_str(
            r#"{"name":"盐","quantity":1.0,"unit":"茶匙","estimated_cost":0.1}"#,
        )
        .unwrap();
        assert!(!parsed.is_optional);
    }

    #[test]
    fn test_difficulty_ordering_and_parse() {
        assert!(Difficulty::Easy < Difficulty::Hard);
        assert_eq!(Difficulty::from_str("MEDIUM").unwrap(), Difficulty::Medium);
        assert_eq!(Difficulty::from_str("困难").unwrap(), Difficulty::Hard);
        assert!(Difficulty::from_str("extreme").is_err());
    }

    #[test]
    fn test_recipe_display() {
        let recipe = omelette()
            .with_instructions(["打蛋", "炒番茄"])
            .with_nutrition(NutritionInfo::new(180.0, 12.0, 8.0, 12.0));
        let output = format!("{}", recipe);
        assert!(output.contains("番茄炒蛋"));
        assert!(output.contains("0.5 茶匙 糖 (optional)"));
        assert!(output.contains("2. 炒番茄"));
        assert!(output.contains("180 kcal"));
    }
}
