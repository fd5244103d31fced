use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sf_cli::commands::{sessions, summary};
use sf_cli::shell::{self, Shell};
use sf_cli::{Cli, Commands, Config};
use sf_core::StudyTracker;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so they never mix with command output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match &cli.command {
        Some(Commands::Presets) => {
            summary::presets(&mut std::io::stdout(), &config.quick_start)?;
        }
        Some(Commands::Shell) | None => {
            let tracker: StudyTracker = StudyTracker::default();
            if cli.demo || config.seed_demo {
                sessions::seed_demo(&tracker).context("failed to seed demo sessions")?;
            }
            shell::run(&Shell::new(tracker, config))?;
        }
    }

    Ok(())
}
