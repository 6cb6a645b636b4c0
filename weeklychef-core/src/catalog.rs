//! Bundled data that is available without any I/O: the default recipe
//! catalog and the sample fridge used on first launch.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{
    Difficulty, Ingredient, IngredientCategory, NutritionInfo, Recipe, RecipeCategory,
    RecipeIngredient,
};

/// Read-only, non-empty, ordered list of recipes. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RecipeCatalog {
    recipes: Arc<[Recipe]>,
}

impl RecipeCatalog {
    /// Wraps an injected recipe list. An empty list falls back to the
    /// bundled catalog so the catalog is never empty.
    pub fn new(recipes: Vec<Recipe>) -> Self {
        if recipes.is_empty() {
            return Self::bundled();
        }
        Self {
            recipes: recipes.into(),
        }
    }

    pub fn bundled() -> Self {
        Self {
            recipes: default_recipes().into(),
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn to_vec(&self) -> Vec<Recipe> {
        self.recipes.to_vec()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl Default for RecipeCatalog {
    fn default() -> Self {
        Self::bundled()
    }
}

/// Five-item starter fridge, dated relative to `now`.
pub fn sample_ingredients(now: DateTime<Utc>) -> Vec<Ingredient> {
    [
        ("番茄", 3.0, "个", IngredientCategory::Vegetables, 5),
        ("鸡蛋", 6.0, "个", IngredientCategory::Dairy, 10),
        ("鸡翅", 8.0, "个", IngredientCategory::Meat, 3),
        ("意面", 500.0, "克", IngredientCategory::Grains, 30),
        ("洋葱", 2.0, "个", IngredientCategory::Vegetables, 7),
    ]
    .into_iter()
    .map(|(name, quantity, unit, category, shelf_days)| {
        Ingredient::new(name, quantity, unit, category)
            .with_purchase_date(now)
            .with_expiration_date(now + Duration::days(shelf_days))
    })
    .collect()
}

fn ri(name: &str, quantity: f64, unit: &str, cost: f64) -> RecipeIngredient {
    RecipeIngredient::new(name, quantity, unit, cost)
}

fn default_recipes() -> Vec<Recipe> {
    let recipes = vec![
        Recipe::new("番茄炒蛋", 10, Difficulty::Easy, RecipeCategory::Chinese)
            .with_description("经典的家常菜，简单易做，营养丰富")
            .with_ingredients(vec![
                ri("番茄", 2.0, "个", 1.0),
                ri("鸡蛋", 3.0, "个", 0.5),
                ri("盐", 1.0, "茶匙", 0.1),
                ri("油", 2.0, "汤匙", 0.2),
                ri("糖", 0.5, "茶匙", 0.1).optional(),
            ])
            .with_instructions([
                "番茄洗净，用开水烫一下去皮，切块",
                "鸡蛋打散，加少许盐调味",
                "热锅下油，炒散鸡蛋，盛起备用",
                "同一锅下番茄翻炒出汁",
                "加入炒蛋翻炒，调味即可",
            ])
            .with_tags(["快手菜", "家常菜", "素食"])
            .with_nutrition(NutritionInfo::new(180.0, 12.0, 8.0, 12.0)),
        Recipe::new("可乐鸡翅", 30, Difficulty::Medium, RecipeCategory::Chinese)
            .with_description("甜咸可口的经典菜，留学生必备")
            .with_ingredients(vec![
                ri("鸡翅", 8.0, "个", 3.0),
                ri("可乐", 1.0, "罐", 1.0),
                ri("生抽", 2.0, "汤匙", 0.3),
                ri("老抽", 1.0, "汤匙", 0.3),
                ri("姜", 3.0, "片", 0.2),
            ])
            .with_instructions([
                "鸡翅洗净，用牙签扎几个小孔",
                "锅中放油，煎至两面金黄",
                "加入可乐、生抽、老抽、姜片",
                "大火烧开后转小火炖20分钟",
                "收汁即可",
            ])
            .with_tags(["肉类", "经典菜", "下饭菜"])
            .with_nutrition(NutritionInfo::new(280.0, 25.0, 15.0, 15.0)),
        Recipe::new("意面配番茄酱", 20, Difficulty::Easy, RecipeCategory::Western)
            .with_description("简单美味的西式料理")
            .with_ingredients(vec![
                ri("意面", 200.0, "克", 1.0),
                ri("番茄", 3.0, "个", 1.5),
                ri("洋葱", 1.0, "个", 0.5),
                ri("蒜", 3.0, "瓣", 0.2),
                ri("橄榄油", 2.0, "汤匙", 0.4),
                ri("盐", 1.0, "茶匙", 0.1),
            ])
            .with_instructions([
                "意面按包装说明煮至8分熟",
                "番茄切块，洋葱切丁，蒜切碎",
                "锅中放橄榄油，爆香蒜末",
                "加入洋葱炒软",
                "加入番茄翻炒出汁",
                "加入煮好的意面，加盐调味",
            ])
            .with_tags(["西餐", "素食", "快手菜"])
            .with_nutrition(NutritionInfo::new(350.0, 12.0, 65.0, 8.0)),
        Recipe::new("香蕉燕麦粥", 8, Difficulty::Easy, RecipeCategory::Breakfast)
            .with_description("营养丰富的快手早餐")
            .with_ingredients(vec![
                ri("燕麦", 0.5, "杯", 0.5),
                ri("香蕉", 1.0, "个", 0.5),
                ri("牛奶", 1.0, "杯", 0.8),
                ri("蜂蜜", 1.0, "茶匙", 0.3).optional(),
                ri("核桃", 5.0, "个", 0.5).optional(),
            ])
            .with_instructions([
                "燕麦用牛奶煮5分钟至软烂",
                "香蕉切片",
                "将香蕉片加入燕麦粥中",
                "根据喜好加入蜂蜜调味",
                "撒上核桃碎即可",
            ])
            .with_tags(["早餐", "健康", "素食"])
            .with_nutrition(NutritionInfo::new(320.0, 12.0, 45.0, 10.0).with_fiber(8.0)),
        Recipe::new("煎蛋三明治", 10, Difficulty::Easy, RecipeCategory::Breakfast)
            .with_description("简单快手的营养早餐")
            .with_ingredients(vec![
                ri("面包片", 2.0, "片", 0.5),
                ri("鸡蛋", 1.0, "个", 0.3),
                ri("生菜", 2.0, "片", 0.3),
                ri("番茄", 0.5, "个", 0.3),
                ri("奶酪", 1.0, "片", 0.5).optional(),
                ri("黄油", 1.0, "茶匙", 0.2),
            ])
            .with_instructions([
                "平底锅刷黄油，煎蛋至半熟",
                "面包片烤至微黄",
                "番茄切片，生菜洗净",
                "依次叠放：面包-生菜-煎蛋-番茄-奶酪-面包",
                "对半切开即可享用",
            ])
            .with_tags(["早餐", "快手菜", "西式"])
            .with_nutrition(NutritionInfo::new(280.0, 15.0, 25.0, 14.0)),
        Recipe::new("电饭煲焖饭", 35, Difficulty::Easy, RecipeCategory::Lunch)
            .with_description("一锅搞定的营养焖饭")
            .with_ingredients(vec![
                ri("大米", 1.0, "杯", 0.5),
                ri("胡萝卜", 1.0, "根", 0.3),
                ri("香肠", 2.0, "根", 1.0),
                ri("豌豆", 0.5, "杯", 0.5),
                ri("生抽", 2.0, "汤匙", 0.2),
                ri("香油", 1.0, "茶匙", 0.2),
            ])
            .with_instructions([
                "大米洗净，加水1.2倍",
                "胡萝卜切丁，香肠切片",
                "所有食材加入电饭煲",
                "加入调料拌匀",
                "按煮饭键，跳闸后焖10分钟",
                "拌匀即可享用",
            ])
            .with_tags(["一锅炖", "简单", "营养"])
            .with_nutrition(NutritionInfo::new(420.0, 18.0, 55.0, 12.0)),
        Recipe::new("土豆炖牛肉", 100, Difficulty::Medium, RecipeCategory::Dinner)
            .with_description("经典的家常炖菜")
            .with_ingredients(vec![
                ri("牛肉", 300.0, "克", 4.0),
                ri("土豆", 2.0, "个", 1.0),
                ri("洋葱", 1.0, "个", 0.5),
                ri("胡萝卜", 1.0, "根", 0.3),
                ri("生抽", 3.0, "汤匙", 0.3),
                ri("料酒", 2.0, "汤匙", 0.3),
                ri("八角", 2.0, "个", 0.2).optional(),
            ])
            .with_instructions([
                "牛肉切块，冷水下锅焯水去血沫",
                "土豆、胡萝卜切块，洋葱切丝",
                "热锅下油，爆香洋葱",
                "下牛肉翻炒，加料酒和生抽",
                "加水没过牛肉，大火烧开转小火炖1小时",
                "加入土豆和胡萝卜，继续炖30分钟至软烂",
            ])
            .with_tags(["炖菜", "下饭菜", "营养"])
            .with_nutrition(NutritionInfo::new(380.0, 30.0, 25.0, 18.0)),
        Recipe::new("蔬菜沙拉", 10, Difficulty::Easy, RecipeCategory::Healthy)
            .with_description("新鲜健康的轻食选择")
            .with_ingredients(vec![
                ri("生菜", 100.0, "克", 1.0),
                ri("黄瓜", 1.0, "根", 0.5),
                ri("番茄", 1.0, "个", 0.5),
                ri("胡萝卜", 0.5, "根", 0.3),
                ri("橄榄油", 2.0, "汤匙", 0.4),
                ri("柠檬汁", 1.0, "汤匙", 0.3),
                ri("盐", 0.5, "茶匙", 0.1),
            ])
            .with_instructions([
                "所有蔬菜洗净切块或切丝",
                "生菜撕成小片",
                "将所有蔬菜混合在大碗中",
                "橄榄油、柠檬汁、盐调成沙拉汁",
                "淋在蔬菜上拌匀即可",
            ])
            .with_tags(["轻食", "素食", "健康"])
            .with_nutrition(NutritionInfo::new(120.0, 2.0, 8.0, 10.0).with_fiber(4.0)),
        Recipe::new("鸡胸肉蔬菜卷", 15, Difficulty::Medium, RecipeCategory::Healthy)
            .with_description("高蛋白低脂的健康餐")
            .with_ingredients(vec![
                ri("鸡胸肉", 150.0, "克", 2.0),
                ri("全麦薄饼", 1.0, "张", 0.5),
                ri("生菜", 3.0, "片", 0.3),
                ri("黄瓜", 0.5, "根", 0.3),
                ri("番茄", 0.5, "个", 0.3),
                ri("希腊酸奶", 2.0, "汤匙", 0.5),
                ri("柠檬汁", 1.0, "茶匙", 0.1),
            ])
            .with_instructions([
                "鸡胸肉用盐胡椒调味，煎至熟透切丝",
                "蔬菜洗净切丝",
                "希腊酸奶加柠檬汁调成酱",
                "薄饼铺平，刷上酸奶酱",
                "依次放入蔬菜和鸡丝",
                "卷成卷状，对半切开",
            ])
            .with_tags(["健康", "高蛋白", "轻食"])
            .with_nutrition(NutritionInfo::new(280.0, 28.0, 20.0, 8.0)),
        Recipe::new("泡面升级版", 8, Difficulty::Easy, RecipeCategory::Snack)
            .with_description("把普通泡面变成营养大餐")
            .with_ingredients(vec![
                ri("方便面", 1.0, "包", 0.5),
                ri("鸡蛋", 1.0, "个", 0.3),
                ri("青菜", 50.0, "克", 0.5),
                ri("火腿肠", 0.5, "根", 0.5),
                ri("海苔", 1.0, "片", 0.3).optional(),
            ])
            .with_instructions([
                "水开后下面条煮2分钟",
                "打入鸡蛋，不要搅散",
                "加入切好的青菜和火腿片",
                "继续煮1分钟",
                "加入调料包，撒海苔丝",
            ])
            .with_tags(["夜宵", "快手", "学生餐"])
            .with_nutrition(NutritionInfo::new(380.0, 15.0, 45.0, 15.0)),
        Recipe::new("烤红薯", 50, Difficulty::Easy, RecipeCategory::Snack)
            .with_description("简单的健康小食")
            .with_ingredients(vec![
                ri("红薯", 1.0, "个", 0.8),
                ri("黄油", 1.0, "茶匙", 0.2).optional(),
                ri("蜂蜜", 1.0, "茶匙", 0.3).optional(),
            ])
            .with_instructions([
                "红薯洗净，用叉子扎几个洞",
                "烤箱预热200度",
                "红薯包锡纸，烤45分钟",
                "取出切开，可加黄油或蜂蜜",
            ])
            .with_tags(["健康", "小食", "烘烤"])
            .with_nutrition(NutritionInfo::new(160.0, 2.0, 37.0, 0.5).with_fiber(6.0)),
        Recipe::new("番茄鸡蛋汤", 15, Difficulty::Easy, RecipeCategory::Chinese)
            .with_description("清爽的家常汤品")
            .with_ingredients(vec![
                ri("番茄", 2.0, "个", 1.0),
                ri("鸡蛋", 2.0, "个", 0.6),
                ri("香菜", 2.0, "根", 0.3).optional(),
                ri("盐", 1.0, "茶匙", 0.1),
                ri("香油", 1.0, "茶匙", 0.2),
            ])
            .with_instructions([
                "番茄去皮切块",
                "锅中放油，炒番茄出汁",
                "加水烧开",
                "鸡蛋打散，慢慢倒入形成蛋花",
                "调味，撒香菜和香油",
            ])
            .with_tags(["汤品", "清淡", "家常"])
            .with_nutrition(NutritionInfo::new(120.0, 8.0, 6.0, 8.0)),
        Recipe::new("紫菜蛋花汤", 10, Difficulty::Easy, RecipeCategory::Chinese)
            .with_description("简单营养的汤品")
            .with_ingredients(vec![
                ri("紫菜", 10.0, "克", 0.5),
                ri("鸡蛋", 1.0, "个", 0.3),
                ri("小葱", 1.0, "根", 0.2),
                ri("盐", 1.0, "茶匙", 0.1),
                ri("香油", 1.0, "茶匙", 0.2),
                ri("虾皮", 1.0, "汤匙", 0.3).optional(),
            ])
            .with_instructions([
                "紫菜用水泡发",
                "锅中加水烧开",
                "下紫菜煮2分钟",
                "鸡蛋打散，慢慢倒入",
                "调味，撒葱花和香油",
            ])
            .with_tags(["汤品", "清淡", "快手"])
            .with_nutrition(NutritionInfo::new(90.0, 6.0, 4.0, 6.0)),
    ];

    // Ids stay the same across runs so bundled recipes can be referenced later.
    recipes
        .into_iter()
        .enumerate()
        .map(|(index, mut recipe)| {
            recipe.id = bundled_recipe_id(index);
            recipe
        })
        .collect()
}

/// Id of the bundled recipe at `index`.
pub fn bundled_recipe_id(index: usize) -> Uuid {
    Uuid::from_u128(BUNDLED_ID_BASE + index as u128)
}

const BUNDLED_ID_BASE: u128 = 0x7765_656b_6c79_4000_8000_0000_0000_0000;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching;

    #[test]
    fn test_bundled_catalog_is_non_empty_and_ordered() {
        let catalog = RecipeCatalog::bundled();
        assert_eq!(catalog.len(), 13);
        assert_eq!(catalog.recipes()[0].name, "番茄炒蛋");
        assert_eq!(catalog.recipes()[12].name, "紫菜蛋花汤");
    }

    #[test]
    fn test_bundled_ids_are_stable() {
        let first = RecipeCatalog::bundled();
        let second = RecipeCatalog::bundled();
        assert_eq!(first.recipes()[3].id, second.recipes()[3].id);
        assert_eq!(first.recipes()[0].id, bundled_recipe_id(0));
        assert_ne!(first.recipes()[0].id, first.recipes()[1].id);
    }

    #[test]
    fn test_empty_injection_falls_back_to_bundled() {
        let catalog = RecipeCatalog::new(Vec::new());
        assert!(!catalog.is_empty());
        assert_eq!(catalog.len(), RecipeCatalog::bundled().len());
    }

    #[test]
    fn test_injected_catalog_is_used_as_is() {
        let recipe = Recipe::new("Toast", 5, Difficulty::Easy, RecipeCategory::Breakfast);
        let catalog = RecipeCatalog::new(vec![recipe.clone()]);
        assert_eq!(catalog.recipes(), &[recipe]);
    }

    #[test]
    fn test_clones_share_storage() {
        let catalog = RecipeCatalog::bundled();
        let copy = catalog.clone();
        assert!(std::ptr::eq(catalog.recipes(), copy.recipes()));
    }

    #[test]
    fn test_sample_ingredients_are_dated_from_now() {
        let now = Utc::now();
        let samples = sample_ingredients(now);
        assert_eq!(samples.len(), 5);
        assert!(samples.iter().all(|i| i.purchase_date == now));
        assert_eq!(samples[2].name, "鸡翅");
        assert_eq!(samples[2].days_until_expiration_at(now), Some(3));
    }

    #[test]
    fn test_sample_fridge_recommends_from_bundled_catalog() {
        let now = Utc::now();
        let samples = sample_ingredients(now);
        let catalog = RecipeCatalog::bundled();
        let recs = matching::recommend(&samples, catalog.recipes());
        // 番茄炒蛋 needs salt and oil too: 2 of 4 required.
        assert!(recs.iter().all(|r| r.name != "番茄炒蛋"));
        // 烤红薯 has only one required ingredient and it is missing.
        assert!(recs.iter().all(|r| r.name != "烤红薯"));
    }
}
