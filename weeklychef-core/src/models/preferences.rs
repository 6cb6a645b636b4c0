use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::category::RecipeCategory;
use super::recipe::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    GlutenFree,
    LactoseFree,
    LowSodium,
    LowFat,
    Diabetic,
    Halal,
    Kosher,
}

impl DietaryRestriction {
    pub const ALL: [DietaryRestriction; 9] = [
        DietaryRestriction::Vegetarian,
        DietaryRestriction::Vegan,
        DietaryRestriction::GlutenFree,
        DietaryRestriction::LactoseFree,
        DietaryRestriction::LowSodium,
        DietaryRestriction::LowFat,
        DietaryRestriction::Diabetic,
        DietaryRestriction::Halal,
        DietaryRestriction::Kosher,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryRestriction::Vegetarian => "vegetarian",
            DietaryRestriction::Vegan => "vegan",
            DietaryRestriction::GlutenFree => "gluten_free",
            DietaryRestriction::LactoseFree => "lactose_free",
            DietaryRestriction::LowSodium => "low_sodium",
            DietaryRestriction::LowFat => "low_fat",
            DietaryRestriction::Diabetic => "diabetic",
            DietaryRestriction::Halal => "halal",
            DietaryRestriction::Kosher => "kosher",
        }
    }
}

impl fmt::Display for DietaryRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DietaryRestriction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        DietaryRestriction::ALL
            .into_iter()
            .find(|r| r.as_str() == normalized)
            .ok_or_else(|| format!("Invalid dietary restriction '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookingSkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CookingSkillLevel {
    /// Hardest recipe difficulty this skill level is comfortable with.
    pub fn max_difficulty(&self) -> Difficulty {
        match self {
            CookingSkillLevel::Beginner => Difficulty::Easy,
            CookingSkillLevel::Intermediate => Difficulty::Medium,
            CookingSkillLevel::Advanced => Difficulty::Hard,
        }
    }
}

impl fmt::Display for CookingSkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookingSkillLevel::Beginner => write!(f, "beginner"),
            CookingSkillLevel::Intermediate => write!(f, "intermediate"),
            CookingSkillLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for CookingSkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(CookingSkillLevel::Beginner),
            "intermediate" => Ok(CookingSkillLevel::Intermediate),
            "advanced" => Ok(CookingSkillLevel::Advanced),
            _ => Err(format!(
                "Invalid skill level '{}'. Valid options: beginner, intermediate, advanced",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetRange {
    Low,
    Medium,
    High,
}

impl BudgetRange {
    /// Upper bound on the cost of a single meal.
    pub fn max_cost(&self) -> f64 {
        match self {
            BudgetRange::Low => 10.0,
            BudgetRange::Medium => 20.0,
            BudgetRange::High => 50.0,
        }
    }
}

impl fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetRange::Low => write!(f, "low"),
            BudgetRange::Medium => write!(f, "medium"),
            BudgetRange::High => write!(f, "high"),
        }
    }
}

impl FromStr for BudgetRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(BudgetRange::Low),
            "medium" => Ok(BudgetRange::Medium),
            "high" => Ok(BudgetRange::High),
            _ => Err(format!(
                "Invalid budget range '{}'. Valid options: low, medium, high",
                s
            )),
        }
    }
}

/// User settings record. Stored and synced, but not read by the matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserPreferences {
    pub dietary_restrictions: BTreeSet<DietaryRestriction>,
    pub preferred_cuisines: BTreeSet<RecipeCategory>,
    pub skill_level: CookingSkillLevel,
    pub max_cooking_time: u32, // minutes
    pub budget_range: BudgetRange,
    pub allergies: Vec<String>,
    pub favorite_ingredients: Vec<String>,
    pub disliked_ingredients: Vec<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            dietary_restrictions: BTreeSet::new(),
            preferred_cuisines: [RecipeCategory::Chinese, RecipeCategory::Quick]
                .into_iter()
                .collect(),
            skill_level: CookingSkillLevel::Beginner,
            max_cooking_time: 30,
            budget_range: BudgetRange::Medium,
            allergies: Vec::new(),
            favorite_ingredients: Vec::new(),
            disliked_ingredients: Vec::new(),
        }
    }
}
