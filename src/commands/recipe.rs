use clap::{Args, Subcommand};
use uuid::Uuid;
use weeklychef_core::{matching, InventoryRepository, Recipe, RecipeCategory};

use super::{truncate, OutputFormat};

#[derive(Args)]
pub struct RecipeCommand {
    #[command(subcommand)]
    pub command: RecipeSubcommand,
}

#[derive(Subcommand)]
pub enum RecipeSubcommand {
    /// List recipes in the catalog
    List {
        /// Filter by category (e.g. chinese, quick, 川菜)
        #[arg(long)]
        category: Option<RecipeCategory>,

        /// Search name, description and tags
        #[arg(long)]
        search: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a recipe's details
    Show {
        /// Recipe ID (UUID) or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Like a recipe
    Like {
        /// Recipe ID (UUID) or name
        identifier: String,
    },
}

impl RecipeCommand {
    pub fn run(&self, repo: &mut InventoryRepository) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            RecipeSubcommand::List {
                category,
                search,
                format,
            } => {
                let mut recipes: Vec<&Recipe> = match search {
                    Some(text) => repo.search_recipes(text),
                    None => repo.recipes().iter().collect(),
                };
                if let Some(category) = category {
                    recipes.retain(|r| r.category == *category);
                }

                if recipes.is_empty() {
                    println!("No recipes found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&recipes)?);
                    }
                    OutputFormat::Text => {
                        println!(
                            "{:<36}  {:<20}  {:<10}  {:>6}  {:<6}  LIKES",
                            "ID", "NAME", "CATEGORY", "TIME", "LEVEL"
                        );
                        println!("{}", "-".repeat(96));
                        for recipe in &recipes {
                            println!(
                                "{:<36}  {:<20}  {:<10}  {:>6}  {:<6}  {}",
                                recipe.id,
                                truncate(&recipe.name, 20),
                                recipe.category.to_string(),
                                format!("{}m", recipe.cooking_time),
                                recipe.difficulty.to_string(),
                                recipe.likes()
                            );
                        }
                        println!("\nTotal: {} recipe(s)", recipes.len());
                    }
                }
                Ok(())
            }

            RecipeSubcommand::Show { identifier, format } => {
                let recipe = resolve(repo, identifier)?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(recipe)?);
                    }
                    OutputFormat::Text => {
                        print!("{}", recipe);

                        let missing = matching::missing_ingredients(recipe, repo.ingredients());
                        if missing.is_empty() {
                            println!("\nYou have everything you need.");
                        } else {
                            println!("\nMissing from your fridge:");
                            for ingredient in &missing {
                                println!("  - {}", ingredient);
                            }
                        }
                    }
                }
                Ok(())
            }

            RecipeSubcommand::Like { identifier } => {
                let (id, name) = {
                    let recipe = resolve(repo, identifier)?;
                    (recipe.id, recipe.name.clone())
                };
                let likes = repo
                    .like_recipe(id)
                    .ok_or_else(|| format!("Recipe not found: {}", identifier))?;
                println!("Liked '{}' ({} like(s))", name, likes);
                Ok(())
            }
        }
    }
}

/// Looks up by UUID first, then by exact name.
fn resolve<'a>(repo: &'a InventoryRepository, identifier: &str) -> Result<&'a Recipe, String> {
    let recipe = match Uuid::parse_str(identifier) {
        Ok(id) => repo.recipe(id),
        Err(_) => repo.find_recipe(identifier),
    };
    recipe.ok_or_else(|| format!("Recipe not found: {}", identifier))
}
