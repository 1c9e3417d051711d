mod lookup;
mod monitor;
mod state;

use clap::{Parser, Subcommand};
use stockwatch_core::{Region, StateStore};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stockwatch")]
#[command(about = "Watch storefront stores for product availability")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add store ids to the watch list
    AddStore {
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },
    /// Set the polling interval in whole hours
    SetInterval {
        #[arg(value_parser = clap::value_parser!(u64).range(1..), value_name = "HOURS")]
        hours: u64,
    },
    /// Select the storefront region (IT, DE, FR)
    SetRegion {
        #[arg(value_name = "CODE")]
        region: Region,
    },
    /// Set the webhook that receives availability notifications
    SetWebhook {
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Print the persisted monitoring state
    Status,
    /// Find stores in a city, with suggestions on a miss
    Lookup {
        #[arg(value_name = "CITY")]
        city: String,
        /// Region to search instead of the selected one
        #[arg(long)]
        region: Option<Region>,
    },
    /// Poll on the configured interval until interrupted
    Run,
    /// Run a single check and exit
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = stockwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let store = StateStore::new(config.state_dir.clone());

    match cli.command {
        Commands::AddStore { ids } => state::add_stores(&store, &ids)?,
        Commands::SetInterval { hours } => state::set_interval(&store, hours)?,
        Commands::SetRegion { region } => state::set_region(&store, region)?,
        Commands::SetWebhook { url } => state::set_webhook(&store, &url)?,
        Commands::Status => state::print_status(&store)?,
        Commands::Lookup { city, region } => {
            lookup::run_lookup(&config, &store, &city, region).await?;
        }
        Commands::Run => monitor::run_monitor(&config, store).await?,
        Commands::Check => monitor::run_single_check(&config, store).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
