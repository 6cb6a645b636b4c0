use clap::{Args, Subcommand};
use weeklychef_core::{
    BudgetRange, CookingSkillLevel, DietaryRestriction, InventoryRepository, RecipeCategory,
    UserPreferences,
};

use super::OutputFormat;

#[derive(Args)]
pub struct PrefsCommand {
    #[command(subcommand)]
    pub command: PrefsSubcommand,
}

#[derive(Subcommand)]
pub enum PrefsSubcommand {
    /// Show current preferences
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Change preferences. List options replace the stored list.
    Set {
        /// Skill level: beginner, intermediate, advanced
        #[arg(long)]
        skill: Option<CookingSkillLevel>,

        /// Maximum cooking time in minutes
        #[arg(long)]
        max_time: Option<u32>,

        /// Budget: low, medium, high
        #[arg(long)]
        budget: Option<BudgetRange>,

        /// Preferred cuisine (can be repeated)
        #[arg(long = "cuisine", value_name = "CUISINE")]
        cuisines: Vec<RecipeCategory>,

        /// Dietary restriction (can be repeated)
        #[arg(long = "restriction", value_name = "RESTRICTION")]
        restrictions: Vec<DietaryRestriction>,

        /// Allergy (can be repeated)
        #[arg(long = "allergy", value_name = "INGREDIENT")]
        allergies: Vec<String>,

        /// Favorite ingredient (can be repeated)
        #[arg(long = "favorite", value_name = "INGREDIENT")]
        favorites: Vec<String>,

        /// Disliked ingredient (can be repeated)
        #[arg(long = "dislike", value_name = "INGREDIENT")]
        dislikes: Vec<String>,
    },
}

impl PrefsCommand {
    pub fn run(&self, repo: &mut InventoryRepository) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            PrefsSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(repo.preferences())?);
                    }
                    OutputFormat::Text => print_preferences(repo.preferences()),
                }
                Ok(())
            }

            PrefsSubcommand::Set {
                skill,
                max_time,
                budget,
                cuisines,
                restrictions,
                allergies,
                favorites,
                dislikes,
            } => {
                let mut prefs = repo.preferences().clone();
                let mut changed = false;

                if let Some(skill) = skill {
                    prefs.skill_level = *skill;
                    changed = true;
                }
                if let Some(minutes) = max_time {
                    if *minutes == 0 {
                        return Err("Maximum cooking time must be at least 1 minute".into());
                    }
                    prefs.max_cooking_time = *minutes;
                    changed = true;
                }
                if let Some(budget) = budget {
                    prefs.budget_range = *budget;
                    changed = true;
                }
                if !cuisines.is_empty() {
                    prefs.preferred_cuisines = cuisines.iter().copied().collect();
                    changed = true;
                }
                if !restrictions.is_empty() {
                    prefs.dietary_restrictions = restrictions.iter().copied().collect();
                    changed = true;
                }
                if !allergies.is_empty() {
                    prefs.allergies = allergies.clone();
                    changed = true;
                }
                if !favorites.is_empty() {
                    prefs.favorite_ingredients = favorites.clone();
                    changed = true;
                }
                if !dislikes.is_empty() {
                    prefs.disliked_ingredients = dislikes.clone();
                    changed = true;
                }

                if !changed {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                repo.set_preferences(prefs);
                println!("Preferences updated:\n");
                print_preferences(repo.preferences());
                Ok(())
            }
        }
    }
}

fn join<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    let joined: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined.join(", ")
    }
}

fn print_preferences(prefs: &UserPreferences) {
    println!("skill_level:          {}", prefs.skill_level);
    println!("max_cooking_time:     {} min", prefs.max_cooking_time);
    println!(
        "budget_range:         {} (up to {:.0} per meal)",
        prefs.budget_range,
        prefs.budget_range.max_cost()
    );
    println!("preferred_cuisines:   {}", join(&prefs.preferred_cuisines));
    println!("dietary_restrictions: {}", join(&prefs.dietary_restrictions));
    println!("allergies:            {}", join(&prefs.allergies));
    println!("favorite_ingredients: {}", join(&prefs.favorite_ingredients));
    println!("disliked_ingredients: {}", join(&prefs.disliked_ingredients));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_empty_is_dash() {
        assert_eq!(join(Vec::<String>::new()), "-");
        assert_eq!(join(["a", "b"]), "a, b");
    }
}
