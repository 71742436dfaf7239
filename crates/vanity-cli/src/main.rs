mod collect;
mod history;
mod summary;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "vanity-cli")]
#[command(about = "Collect, reconcile, and summarize public social-media stats")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape every roster account, merge with the stored snapshot, and
    /// append history
    Collect {
        /// Only collect this profile id
        #[arg(long)]
        profile: Option<String>,
        /// List the accounts that would be scraped without fetching anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Maintain per-profile history documents
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Print the stored follower leaderboard
    Summary,
}

#[derive(Debug, Subcommand)]
enum HistoryCommands {
    /// Rebuild history from archived snapshot folders named by epoch millis
    Rebuild {
        /// Directory holding the numbered snapshot folders
        #[arg(long)]
        from: PathBuf,
    },
    /// Delete every history document in the output directory
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = vanity_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Collect { profile, dry_run } => {
            let roster = vanity_core::load_profiles(&config.profiles_path)?;
            collect::run_collect(&config, &roster, profile.as_deref(), dry_run).await?;
        }
        Commands::History {
            command: HistoryCommands::Rebuild { from },
        } => {
            let roster = vanity_core::load_profiles(&config.profiles_path)?;
            history::run_history_rebuild(&config, &roster, &from)?;
        }
        Commands::History {
            command: HistoryCommands::Clear,
        } => history::run_history_clear(&config)?,
        Commands::Summary => summary::run_summary(&config)?,
    }

    Ok(())
}
