use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fridge section an ingredient belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Vegetables,
    Fruits,
    Meat,
    Seafood,
    Dairy,
    Grains,
    Condiments,
    Snacks,
    Beverages,
    Other,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 10] = [
        IngredientCategory::Vegetables,
        IngredientCategory::Fruits,
        IngredientCategory::Meat,
        IngredientCategory::Seafood,
        IngredientCategory::Dairy,
        IngredientCategory::Grains,
        IngredientCategory::Condiments,
        IngredientCategory::Snacks,
        IngredientCategory::Beverages,
        IngredientCategory::Other,
    ];

    /// Stable lowercase identifier, also the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Vegetables => "vegetables",
            IngredientCategory::Fruits => "fruits",
            IngredientCategory::Meat => "meat",
            IngredientCategory::Seafood => "seafood",
            IngredientCategory::Dairy => "dairy",
            IngredientCategory::Grains => "grains",
            IngredientCategory::Condiments => "condiments",
            IngredientCategory::Snacks => "snacks",
            IngredientCategory::Beverages => "beverages",
            IngredientCategory::Other => "other",
        }
    }

    /// Label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            IngredientCategory::Vegetables => "蔬菜",
            IngredientCategory::Fruits => "水果",
            IngredientCategory::Meat => "肉类",
            IngredientCategory::Seafood => "海鲜",
            IngredientCategory::Dairy => "乳制品",
            IngredientCategory::Grains => "主食",
            IngredientCategory::Condiments => "调料",
            IngredientCategory::Snacks => "零食",
            IngredientCategory::Beverages => "饮料",
            IngredientCategory::Other => "其他",
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IngredientCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        IngredientCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle) || c.label() == needle)
            .ok_or_else(|| {
                format!(
                    "Invalid ingredient category '{}'. Valid options: {}",
                    s,
                    IngredientCategory::ALL
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// Cuisine or meal tag attached to a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeCategory {
    Chinese,
    Western,
    Quick,
    Healthy,
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl RecipeCategory {
    pub const ALL: [RecipeCategory; 8] = [
        RecipeCategory::Chinese,
        RecipeCategory::Western,
        RecipeCategory::Quick,
        RecipeCategory::Healthy,
        RecipeCategory::Breakfast,
        RecipeCategory::Lunch,
        RecipeCategory::Dinner,
        RecipeCategory::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeCategory::Chinese => "chinese",
            RecipeCategory::Western => "western",
            RecipeCategory::Quick => "quick",
            RecipeCategory::Healthy => "healthy",
            RecipeCategory::Breakfast => "breakfast",
            RecipeCategory::Lunch => "lunch",
            RecipeCategory::Dinner => "dinner",
            RecipeCategory::Snack => "snack",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecipeCategory::Chinese => "中餐",
            RecipeCategory::Western => "西餐",
            RecipeCategory::Quick => "快手菜",
            RecipeCategory::Healthy => "健康餐",
            RecipeCategory::Breakfast => "早餐",
            RecipeCategory::Lunch => "午餐",
            RecipeCategory::Dinner => "晚餐",
            RecipeCategory::Snack => "小食",
        }
    }
}

impl fmt::Display for RecipeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecipeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        RecipeCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle) || c.label() == needle)
            .ok_or_else(|| {
                format!(
                    "Invalid recipe category '{}'. Valid options: {}",
                    s,
                    RecipeCategory::ALL
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}
