use clap::Args;
use weeklychef_core::matching::{Filter, Recommendation, Tier};
use weeklychef_core::InventoryRepository;

use super::{truncate, OutputFormat};

/// Recommend recipes for what is in the fridge
#[derive(Args)]
pub struct RecommendCommand {
    /// Which recommendations to show: all, can-make, need-few, need-more
    #[arg(long, default_value = "all")]
    filter: Filter,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl RecommendCommand {
    pub fn run(&self, repo: &InventoryRepository) -> Result<(), Box<dyn std::error::Error>> {
        let recommendations = repo.recommendations();
        let selected = recommendations.filtered(self.filter);

        if let OutputFormat::Json = self.format {
            println!("{}", serde_json::to_string_pretty(&selected)?);
            return Ok(());
        }

        if recommendations.all.is_empty() {
            println!("Nothing in the catalog matches your fridge yet.");
            return Ok(());
        }

        match self.filter {
            Filter::Only(tier) => print_tier(tier, &selected),
            Filter::All => {
                println!(
                    "{} recipe(s) recommended from {} ingredient(s)\n",
                    recommendations.all.len(),
                    repo.ingredients().len()
                );
                for tier in [Tier::CanMake, Tier::NeedFew, Tier::NeedMore] {
                    let in_tier = recommendations.tier(tier);
                    if !in_tier.is_empty() {
                        print_tier(tier, &in_tier);
                        println!();
                    }
                }
            }
        }
        Ok(())
    }
}

fn print_tier(tier: Tier, recommendations: &[&Recommendation<'_>]) {
    println!("{} ({})", tier.label(), tier);
    if recommendations.is_empty() {
        println!("  (none)");
        return;
    }
    for rec in recommendations {
        println!(
            "  {:<20}  {:>3.0}%  {}/{}  {}",
            truncate(&rec.recipe.name, 20),
            rec.report.ratio * 100.0,
            rec.report.matched,
            rec.report.required,
            missing_summary(rec)
        );
    }
}

fn missing_summary(rec: &Recommendation<'_>) -> String {
    if rec.report.missing.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = rec.report.missing.iter().map(|i| i.name.as_str()).collect();
    format!("missing: {}", names.join(", "))
}
