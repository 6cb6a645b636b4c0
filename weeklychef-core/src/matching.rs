//! Recipe-to-fridge matching.
//!
//! Everything here is a pure function of the inventory and catalog handed
//! in. Ingredient equivalence is decided by [`matches`] alone: a required
//! name and an available name are equivalent when, ignoring case, either
//! one contains the other. The rule is loose on purpose ("番茄" matches
//! "番茄酱") and over-matches in known ways ("egg" matches "eggplant").
//!
//! # Tiers
//!
//! [`recommend`] keeps recipes whose coverage ratio is at least
//! [`RECOMMEND_THRESHOLD`]. Each [`Tier`] then applies its own predicate:
//! `CanMake` is a ratio threshold, `NeedFew` and `NeedMore` count missing
//! ingredients. The predicates are evaluated independently, so a recipe
//! with ten or more required ingredients and exactly one missing passes
//! both `CanMake` and `NeedFew`. [`classify`] picks one tier with
//! precedence `CanMake`, `NeedFew`, `NeedMore`.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::{Ingredient, Recipe, RecipeIngredient};

/// Minimum coverage ratio for a recipe to be recommended at all.
pub const RECOMMEND_THRESHOLD: f64 = 0.70;
/// Minimum coverage ratio for the "can make now" tier.
pub const CAN_MAKE_THRESHOLD: f64 = 0.90;
/// Largest missing count still considered "need a few".
pub const NEED_FEW_MAX_MISSING: usize = 2;

/// Case-insensitive, bidirectional substring equivalence.
pub fn matches<S: AsRef<str>>(required: &str, available: &[S]) -> bool {
    let required = required.to_lowercase();
    available.iter().any(|name| {
        let name = name.as_ref().to_lowercase();
        name.contains(&required) || required.contains(&name)
    })
}

/// True if anything in the inventory is equivalent to `name`.
pub fn has_ingredient(name: &str, inventory: &[Ingredient]) -> bool {
    matches(name, &inventory_names(inventory))
}

fn inventory_names(inventory: &[Ingredient]) -> Vec<&str> {
    inventory.iter().map(|i| i.name.as_str()).collect()
}

/// Outcome of matching one recipe against an inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub recipe_id: Uuid,
    /// Number of non-optional ingredients.
    pub required: usize,
    /// Number of non-optional ingredients found in the inventory.
    pub matched: usize,
    /// Non-optional ingredients not found, in recipe order.
    pub missing: Vec<RecipeIngredient>,
    pub ratio: f64,
}

impl MatchReport {
    pub fn missing_count(&self) -> usize {
        self.required - self.matched
    }

    pub fn is_recommended(&self) -> bool {
        self.ratio >= RECOMMEND_THRESHOLD
    }
}

pub fn analyze(recipe: &Recipe, inventory: &[Ingredient]) -> MatchReport {
    let names = inventory_names(inventory);
    let mut required = 0;
    let mut missing = Vec::new();

    for ingredient in recipe.required_ingredients() {
        required += 1;
        if !matches(&ingredient.name, &names) {
            missing.push(ingredient.clone());
        }
    }

    let matched = required - missing.len();
    // A recipe with nothing required is always fully covered.
    let ratio = if required == 0 {
        1.0
    } else {
        matched as f64 / required as f64
    };

    MatchReport {
        recipe_id: recipe.id,
        required,
        matched,
        missing,
        ratio,
    }
}

pub fn coverage_ratio(recipe: &Recipe, inventory: &[Ingredient]) -> f64 {
    analyze(recipe, inventory).ratio
}

pub fn missing_ingredients(recipe: &Recipe, inventory: &[Ingredient]) -> Vec<RecipeIngredient> {
    analyze(recipe, inventory).missing
}

/// Recipes at or above [`RECOMMEND_THRESHOLD`], in catalog order.
pub fn recommend<'a>(inventory: &[Ingredient], catalog: &'a [Recipe]) -> Vec<&'a Recipe> {
    catalog
        .iter()
        .filter(|recipe| coverage_ratio(recipe, inventory) >= RECOMMEND_THRESHOLD)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    CanMake,
    NeedFew,
    NeedMore,
}

impl Tier {
    pub fn admits(&self, report: &MatchReport) -> bool {
        match self {
            Tier::CanMake => report.ratio >= CAN_MAKE_THRESHOLD,
            Tier::NeedFew => (1..=NEED_FEW_MAX_MISSING).contains(&report.missing_count()),
            Tier::NeedMore => report.missing_count() > NEED_FEW_MAX_MISSING,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::CanMake => "可立即制作",
            Tier::NeedFew => "差1-2种食材",
            Tier::NeedMore => "差更多食材",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::CanMake => write!(f, "can-make"),
            Tier::NeedFew => write!(f, "need-few"),
            Tier::NeedMore => write!(f, "need-more"),
        }
    }
}

pub fn classify_report(report: &MatchReport) -> Tier {
    [Tier::CanMake, Tier::NeedFew]
        .into_iter()
        .find(|tier| tier.admits(report))
        .unwrap_or(Tier::NeedMore)
}

pub fn classify(recipe: &Recipe, inventory: &[Ingredient]) -> Tier {
    classify_report(&analyze(recipe, inventory))
}

/// Which slice of the recommendations to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Only(Tier),
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "all" => Ok(Filter::All),
            "can-make" => Ok(Filter::Only(Tier::CanMake)),
            "need-few" => Ok(Filter::Only(Tier::NeedFew)),
            "need-more" => Ok(Filter::Only(Tier::NeedMore)),
            _ => Err(format!(
                "Invalid filter '{}'. Valid options: all, can-make, need-few, need-more",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation<'a> {
    pub recipe: &'a Recipe,
    pub report: MatchReport,
}

/// Recommended recipes plus their per-tier views.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendations<'a> {
    pub all: Vec<Recommendation<'a>>,
}

impl<'a> Recommendations<'a> {
    pub fn tier(&self, tier: Tier) -> Vec<&Recommendation<'a>> {
        self.all.iter().filter(|r| tier.admits(&r.report)).collect()
    }

    pub fn can_make(&self) -> Vec<&Recommendation<'a>> {
        self.tier(Tier::CanMake)
    }

    pub fn need_few(&self) -> Vec<&Recommendation<'a>> {
        self.tier(Tier::NeedFew)
    }

    pub fn need_more(&self) -> Vec<&Recommendation<'a>> {
        self.tier(Tier::NeedMore)
    }

    pub fn filtered(&self, filter: Filter) -> Vec<&Recommendation<'a>> {
        match filter {
            Filter::All => self.all.iter().collect(),
            Filter::Only(tier) => self.tier(tier),
        }
    }
}

pub fn bucket<'a>(inventory: &[Ingredient], catalog: &'a [Recipe]) -> Recommendations<'a> {
    let all = catalog
        .iter()
        .map(|recipe| Recommendation {
            recipe,
            report: analyze(recipe, inventory),
        })
        .filter(|r| r.report.is_recommended())
        .collect();
    Recommendations { all }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, IngredientCategory, RecipeCategory};

    fn fridge(names: &[&str]) -> Vec<Ingredient> {
        names
            .iter()
            .map(|n| Ingredient::new(*n, 1.0, "", IngredientCategory::Other))
            .collect()
    }

    fn recipe(name: &str, parts: &[(&str, bool)]) -> Recipe {
        Recipe::new(name, 10, Difficulty::Easy, RecipeCategory::Chinese).with_ingredients(
            parts
                .iter()
                .map(|(n, optional)| {
                    let ingredient = RecipeIngredient::new(*n, 1.0, "", 0.5);
                    if *optional {
                        ingredient.optional()
                    } else {
                        ingredient
                    }
                })
                .collect(),
        )
    }

    #[test]
    fn test_matches_substring_either_direction() {
        assert!(matches("番茄", &["新鲜番茄罐头"]));
        assert!(matches("番茄酱", &["番茄"]));
        assert!(!matches("牛肉", &["鸡肉", "番茄"]));
    }

    #[test]
    fn test_matches_is_case_insensitive_and_overmatches() {
        assert!(matches("Egg", &["EGGPLANT"]));
        assert!(matches("OLIVE OIL", &["olive"]));
        assert!(!matches("egg", &[] as &[&str]));
    }

    #[test]
    fn test_only_optional_ingredients_is_fully_covered() {
        let r = recipe("烤红薯", &[("黄油", true), ("蜂蜜", true)]);
        assert_eq!(coverage_ratio(&r, &[]), 1.0);
        let catalog = vec![r];
        assert_eq!(recommend(&[], &catalog).len(), 1);
        assert_eq!(classify(&catalog[0], &[]), Tier::CanMake);
    }

    #[test]
    fn test_two_of_three_is_below_threshold() {
        let inventory = fridge(&["番茄", "鸡蛋"]);
        let r = recipe("番茄炒蛋", &[("番茄", false), ("鸡蛋", false), ("盐", false)]);
        let ratio = coverage_ratio(&r, &inventory);
        assert!((ratio - 2.0 / 3.0).abs() < 1e-9);
        let catalog = vec![r];
        assert!(recommend(&inventory, &catalog).is_empty());
    }

    #[test]
    fn test_optional_salt_makes_recipe_can_make() {
        let inventory = fridge(&["番茄", "鸡蛋"]);
        let r = recipe("番茄炒蛋", &[("番茄", false), ("鸡蛋", false), ("盐", true)]);
        assert_eq!(coverage_ratio(&r, &inventory), 1.0);
        assert_eq!(classify(&r, &inventory), Tier::CanMake);
        assert!(missing_ingredients(&r, &inventory).is_empty());
    }

    #[test]
    fn test_exactly_seventy_percent_is_recommended() {
        let names: Vec<String> = (0..10).map(|i| format!("item{:02}", i)).collect();
        let parts: Vec<(&str, bool)> = names.iter().map(|n| (n.as_str(), false)).collect();
        let r = recipe("big", &parts);
        let inventory = fridge(&names[..7].iter().map(String::as_str).collect::<Vec<_>>());

        let report = analyze(&r, &inventory);
        assert_eq!(report.matched, 7);
        assert_eq!(report.missing_count(), 3);
        assert!(report.is_recommended());
        assert_eq!(classify_report(&report), Tier::NeedMore);
    }

    #[test]
    fn test_recommend_preserves_catalog_order() {
        let inventory = fridge(&["番茄", "鸡蛋", "意面"]);
        let catalog = vec![
            recipe("B", &[("意面", false)]),
            recipe("skip", &[("牛肉", false)]),
            recipe("A", &[("番茄", false), ("鸡蛋", false)]),
        ];
        let names: Vec<_> = recommend(&inventory, &catalog)
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_missing_ingredients_keep_recipe_order_and_skip_optional() {
        let inventory = fridge(&["鸡蛋"]);
        let r = recipe(
            "汤",
            &[("紫菜", false), ("鸡蛋", false), ("虾皮", true), ("小葱", false)],
        );
        let missing: Vec<_> = missing_ingredients(&r, &inventory)
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(missing, vec!["紫菜", "小葱"]);
    }

    #[test]
    fn test_need_few_tier() {
        let inventory = fridge(&["a1", "a2", "a3", "a4"]);
        let r = recipe(
            "five",
            &[("a1", false), ("a2", false), ("a3", false), ("a4", false), ("zz", false)],
        );
        let report = analyze(&r, &inventory);
        assert!((report.ratio - 0.8).abs() < 1e-9);
        assert!(report.is_recommended());
        assert!(!Tier::CanMake.admits(&report));
        assert!(Tier::NeedFew.admits(&report));
        assert_eq!(classify_report(&report), Tier::NeedFew);
    }

    #[test]
    fn test_tier_views_can_overlap() {
        // 9 of 10: ratio 0.9 passes CanMake, one missing passes NeedFew.
        let names: Vec<String> = (0..10).map(|i| format!("part{:02}", i)).collect();
        let parts: Vec<(&str, bool)> = names.iter().map(|n| (n.as_str(), false)).collect();
        let catalog = vec![recipe("overlap", &parts)];
        let inventory = fridge(&names[..9].iter().map(String::as_str).collect::<Vec<_>>());

        let recs = bucket(&inventory, &catalog);
        assert_eq!(recs.all.len(), 1);
        assert_eq!(recs.can_make().len(), 1);
        assert_eq!(recs.need_few().len(), 1);
        assert!(recs.need_more().is_empty());
        assert_eq!(classify(&catalog[0], &inventory), Tier::CanMake);
    }

    #[test]
    fn test_bucket_excludes_unrecommended_recipes() {
        let inventory = fridge(&["番茄"]);
        let catalog = vec![
            recipe("ok", &[("番茄", false)]),
            recipe("no", &[("番茄", false), ("牛肉", false), ("土豆", false)]),
        ];
        let recs = bucket(&inventory, &catalog);
        assert_eq!(recs.filtered(Filter::All).len(), 1);
        assert_eq!(recs.filtered(Filter::Only(Tier::CanMake)).len(), 1);
        assert!(recs.filtered(Filter::Only(Tier::NeedMore)).is_empty());
    }

    #[test]
    fn test_empty_inventory_name_matches_everything() {
        let inventory = fridge(&[""]);
        assert!(has_ingredient("anything", &inventory));
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!(Filter::from_str("all").unwrap(), Filter::All);
        assert_eq!(
            Filter::from_str("can_make").unwrap(),
            Filter::Only(Tier::CanMake)
        );
        assert_eq!(
            Filter::from_str("Need-More").unwrap(),
            Filter::Only(Tier::NeedMore)
        );
        assert!(Filter::from_str("some").is_err());
    }
}
