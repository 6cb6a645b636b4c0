use chrono::Utc;
use clap::{Args, Subcommand};
use uuid::Uuid;
use weeklychef_core::{Ingredient, IngredientCategory, InventoryRepository};

use super::{days_from, parse_date, truncate, OutputFormat};

#[derive(Args)]
pub struct FridgeCommand {
    #[command(subcommand)]
    pub command: FridgeSubcommand,
}

#[derive(Subcommand)]
pub enum FridgeSubcommand {
    /// List ingredients in the fridge
    List {
        /// Only show this category (e.g. vegetables, meat, 蔬菜)
        #[arg(long)]
        category: Option<IngredientCategory>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add an ingredient
    Add {
        /// Ingredient name
        name: String,

        /// Quantity (amount)
        #[arg(long, default_value_t = 1.0)]
        quantity: f64,

        /// Unit of measurement
        #[arg(long, default_value = "")]
        unit: String,

        /// Category
        #[arg(long, default_value = "other")]
        category: IngredientCategory,

        /// Expiration date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "expires_in")]
        expires: Option<String>,

        /// Expires this many days from now
        #[arg(long, value_name = "DAYS")]
        expires_in: Option<i64>,

        /// Purchase date (YYYY-MM-DD, default: now)
        #[arg(long)]
        purchased: Option<String>,
    },

    /// Update an existing ingredient
    Update {
        /// Ingredient ID (UUID)
        id: Uuid,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New quantity
        #[arg(long)]
        quantity: Option<f64>,

        /// New unit
        #[arg(long)]
        unit: Option<String>,

        /// New category
        #[arg(long)]
        category: Option<IngredientCategory>,

        /// New expiration date (YYYY-MM-DD)
        #[arg(long)]
        expires: Option<String>,
    },

    /// Remove an ingredient
    Remove {
        /// Ingredient ID (UUID)
        id: Uuid,
    },

    /// Show ingredients expiring within three days
    Expiring {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl FridgeCommand {
    pub fn run(&self, repo: &mut InventoryRepository) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FridgeSubcommand::List { category, format } => {
                let ingredients: Vec<&Ingredient> = match category {
                    Some(category) => repo.ingredients_by_category(*category),
                    None => repo.ingredients().iter().collect(),
                };

                if ingredients.is_empty() {
                    println!("No ingredients found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&ingredients)?);
                    }
                    OutputFormat::Text => print_table(&ingredients),
                }
                Ok(())
            }

            FridgeSubcommand::Add {
                name,
                quantity,
                unit,
                category,
                expires,
                expires_in,
                purchased,
            } => {
                if name.trim().is_empty() {
                    return Err("Ingredient name cannot be empty".into());
                }
                if *quantity < 0.0 {
                    return Err("Quantity cannot be negative".into());
                }

                let mut ingredient = Ingredient::new(name.trim(), *quantity, unit.trim(), *category);
                if let Some(date) = purchased {
                    ingredient = ingredient.with_purchase_date(parse_date(date)?);
                }
                if let Some(date) = expires {
                    ingredient = ingredient.with_expiration_date(parse_date(date)?);
                }
                if let Some(days) = expires_in {
                    ingredient = ingredient.with_expiration_date(days_from(Utc::now(), *days)?);
                }

                let id = repo.add_ingredient(ingredient);
                if let Some(added) = repo.ingredient(id) {
                    println!("Added ingredient:");
                    println!("  {}  {}", added.id(), added);
                }
                Ok(())
            }

            FridgeSubcommand::Update {
                id,
                name,
                quantity,
                unit,
                category,
                expires,
            } => {
                let has_updates = name.is_some()
                    || quantity.is_some()
                    || unit.is_some()
                    || category.is_some()
                    || expires.is_some();
                if !has_updates {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let mut ingredient = match repo.ingredient(*id) {
                    Some(i) => i.clone(),
                    None => return Err(format!("Ingredient not found: {}", id).into()),
                };

                if let Some(new_name) = name {
                    ingredient.name = new_name.trim().to_string();
                }
                if let Some(new_quantity) = quantity {
                    if *new_quantity < 0.0 {
                        return Err("Quantity cannot be negative".into());
                    }
                    ingredient.quantity = *new_quantity;
                }
                if let Some(new_unit) = unit {
                    ingredient.unit = new_unit.trim().to_string();
                }
                if let Some(new_category) = category {
                    ingredient.category = *new_category;
                }
                if let Some(date) = expires {
                    ingredient.expiration_date = Some(parse_date(date)?);
                }

                repo.update_ingredient(ingredient);
                if let Some(updated) = repo.ingredient(*id) {
                    println!("Updated ingredient:");
                    println!("  {}  {}", updated.id(), updated);
                }
                Ok(())
            }

            FridgeSubcommand::Remove { id } => match repo.remove_ingredient(*id) {
                Some(removed) => {
                    println!("Removed ingredient: {}", removed.name);
                    Ok(())
                }
                None => Err(format!("Ingredient not found: {}", id).into()),
            },

            FridgeSubcommand::Expiring { format } => {
                let expiring = repo.expiring_ingredients();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&expiring)?);
                    }
                    OutputFormat::Text => {
                        if expiring.is_empty() {
                            println!("Nothing expires in the next 3 days");
                        } else {
                            print_table(&expiring);
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

fn print_table(ingredients: &[&Ingredient]) {
    let now = Utc::now();
    println!(
        "{:<36}  {:<20}  {:>10}  {:<12}  EXPIRES",
        "ID", "NAME", "QUANTITY", "CATEGORY"
    );
    println!("{}", "-".repeat(100));
    for ingredient in ingredients {
        let quantity = if ingredient.unit.is_empty() {
            ingredient.quantity.to_string()
        } else {
            format!("{} {}", ingredient.quantity, ingredient.unit)
        };
        println!(
            "{:<36}  {:<20}  {:>10}  {:<12}  {}",
            ingredient.id(),
            truncate(&ingredient.name, 20),
            quantity,
            ingredient.category.to_string(),
            expiry_label(ingredient, now)
        );
    }
    println!("\nTotal: {} ingredient(s)", ingredients.len());
}

fn expiry_label(ingredient: &Ingredient, now: chrono::DateTime<Utc>) -> String {
    match ingredient.days_until_expiration_at(now) {
        None => "-".to_string(),
        Some(_) if ingredient.is_expired_at(now) => "expired".to_string(),
        Some(0) => "today".to_string(),
        Some(1) => "in 1 day".to_string(),
        Some(days) => format!("in {} days", days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry_label() {
        let now = Utc::now();
        let item = |offset: Duration| {
            Ingredient::new("牛奶", 1.0, "L", IngredientCategory::Dairy)
                .with_expiration_date(now + offset)
        };

        assert_eq!(
            expiry_label(&Ingredient::new("盐", 1.0, "", IngredientCategory::Condiments), now),
            "-"
        );
        assert_eq!(expiry_label(&item(Duration::hours(3)), now), "today");
        assert_eq!(expiry_label(&item(Duration::days(1)), now), "in 1 day");
        assert_eq!(expiry_label(&item(Duration::days(5)), now), "in 5 days");
        assert_eq!(expiry_label(&item(-Duration::hours(3)), now), "expired");
    }
}
