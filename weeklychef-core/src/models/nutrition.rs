use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-serving nutrition facts. Informational only.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NutritionInfo {
    pub calories: f64,
    /// grams
    pub protein: f64,
    /// grams
    pub carbohydrates: f64,
    /// grams
    pub fat: f64,
    /// grams
    pub fiber: f64,
    /// grams
    pub sugar: f64,
    /// milligrams
    pub sodium: f64,
}

impl NutritionInfo {
    pub fn new(calories: f64, protein: f64, carbohydrates: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbohydrates,
            fat,
            ..Self::default()
        }
    }

    pub fn with_fiber(mut self, fiber: f64) -> Self {
        self.fiber = fiber;
        self
    }
}

impl fmt::Display for NutritionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kcal, protein {} g, carbs {} g, fat {} g",
            self.calories, self.protein, self.carbohydrates, self.fat
        )?;
        if self.fiber > 0.0 {
            write!(f, ", fiber {} g", self.fiber)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let parsed: NutritionInfo = serde_json::from_str(r#"{"calories": 180.0}"#).unwrap();
        assert_eq!(parsed.calories, 180.0);
        assert_eq!(parsed.sodium, 0.0);
        assert_eq!(parsed.fiber, 0.0);
    }

    #[test]
    fn test_nutrition_display() {
        let info = NutritionInfo::new(320.0, 12.0, 45.0, 10.0).with_fiber(8.0);
        assert_eq!(
            format!("{}", info),
            "320 kcal, protein 12 g, carbs 45 g, fat 10 g, fiber 8 g"
        );
    }
}
