//! Sync CLI commands for talking to the remote service.

use clap::Args;
use serde::Serialize;
use weeklychef_core::{SyncCoordinator, SyncState};

use super::OutputFormat;
use crate::config::Config;

/// Upload local ingredients and reload from the remote service
#[derive(Debug, Args)]
pub struct SyncCommand {}

impl SyncCommand {
    pub async fn run(
        &self,
        coordinator: &mut SyncCoordinator,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !config.remote.is_configured() {
            println!("Sync is not configured.");
            println!();
            println!("To enable sync, add to your config file:");
            println!();
            println!("  remote:");
            println!("    server_url: \"http://localhost:8080\"");
            println!();
            println!("Or set the CHEF_SERVER_URL environment variable.");
            return Ok(());
        }

        if coordinator.state() == SyncState::Offline {
            println!("Server unreachable, retrying...");
            coordinator.retry_connection().await?;
        }

        match coordinator.resync().await? {
            SyncState::Online => {
                let repo = coordinator.repository();
                println!(
                    "Sync complete: {} ingredient(s), {} recipe(s).",
                    repo.ingredients().len(),
                    repo.recipes().len()
                );
                Ok(())
            }
            _ => {
                let error = coordinator
                    .repository()
                    .status()
                    .error
                    .unwrap_or_else(|| "unknown error".to_string());
                Err(format!("Sync failed, working offline: {}", error).into())
            }
        }
    }
}

/// Show connectivity and local data summary
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct StatusReport<'a> {
    state: String,
    online: bool,
    error: Option<String>,
    server_url: Option<&'a str>,
    ingredients: usize,
    expiring: usize,
    recipes: usize,
    recommended: usize,
}

impl StatusCommand {
    pub fn run(
        &self,
        coordinator: &SyncCoordinator,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let repo = coordinator.repository();
        let status = repo.status();
        let report = StatusReport {
            state: coordinator.state().to_string(),
            online: status.online,
            error: status.error,
            server_url: config.remote.server_url.as_deref(),
            ingredients: repo.ingredients().len(),
            expiring: repo.expiring_ingredients().len(),
            recipes: repo.recipes().len(),
            recommended: repo.recommendations().all.len(),
        };

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                println!("Status");
                println!("======");
                println!();
                println!("Connection:  {}", report.state);
                println!(
                    "Server:      {}",
                    report.server_url.unwrap_or("(not configured)")
                );
                if let Some(error) = &report.error {
                    println!("Last error:  {}", error);
                }
                println!();
                println!("Ingredients: {} ({} expiring soon)", report.ingredients, report.expiring);
                println!("Recipes:     {}", report.recipes);
                println!("Recommended: {}", report.recommended);
            }
        }
        Ok(())
    }
}
