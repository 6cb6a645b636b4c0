use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    ConfigCommand, FridgeCommand, PrefsCommand, RecipeCommand, RecommendCommand, StatusCommand,
    SyncCommand,
};
use config::Config;
use weeklychef_core::{
    HttpRemoteClient, InventoryRepository, JsonFileStore, RecipeCatalog, SyncCoordinator,
};

#[derive(Parser)]
#[command(name = "chef")]
#[command(version)]
#[command(about = "Track your fridge and find recipes you can cook", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage ingredients in the fridge
    Fridge(FridgeCommand),

    /// Browse and like recipes
    Recipe(RecipeCommand),

    /// Recommend recipes for what is in the fridge
    Recommend(RecommendCommand),

    /// Show or change preferences
    Prefs(PrefsCommand),

    /// Sync with the remote service
    Sync(SyncCommand),

    /// Show connectivity and data summary
    Status(StatusCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weeklychef=warn,weeklychef_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cli_config_path = cli.config.clone();
    let config = Config::load(cli.config)?;

    let command = match cli.command {
        Some(Commands::Config(cmd)) => return cmd.run(&config, cli_config_path),
        Some(command) => command,
        None => {
            println!("Use --help to see available commands");
            return Ok(());
        }
    };

    let mut coordinator = open(&config)?;
    coordinator.start().await?;

    let result = match command {
        Commands::Fridge(cmd) => cmd.run(coordinator.repository_mut()),
        Commands::Recipe(cmd) => cmd.run(coordinator.repository_mut()),
        Commands::Recommend(cmd) => cmd.run(coordinator.repository()),
        Commands::Prefs(cmd) => cmd.run(coordinator.repository_mut()),
        Commands::Sync(cmd) => cmd.run(&mut coordinator, &config).await,
        Commands::Status(cmd) => cmd.run(&coordinator, &config),
        Commands::Config(_) => Ok(()),
    };

    // Give queued remote writes their single attempt before exiting
    coordinator.repository().flush().await;

    result
}

fn open(config: &Config) -> Result<SyncCoordinator, Box<dyn std::error::Error>> {
    let data_dir = config.data_dir.value.clone();
    tracing::debug!("Data directory: {}", data_dir.display());

    let store = Arc::new(JsonFileStore::new(data_dir));
    let remote = Arc::new(HttpRemoteClient::new(
        config.remote.server_url.clone(),
        config.remote.timeout(),
    )?);

    let repository = InventoryRepository::new(store, remote, RecipeCatalog::bundled());
    Ok(SyncCoordinator::new(repository))
}
