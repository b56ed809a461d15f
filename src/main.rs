//! reelcut command-line video editor
//!
//! # Usage
//!
//! ```bash
//! reelcut probe a.mp4 b.mkv --max-concurrent 4 --format json
//! reelcut list ~/Videos
//! reelcut edit --input talk.mp4 --range 0:10-1:30 --range 5:00-6:15
//! reelcut subtitles talk.srt
//! reelcut transcribe talk.mp4
//! reelcut settings show
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use reelcut_cli::app::DefaultAppContainer;
use reelcut_cli::cli::{commands, Cli, Commands};
use reelcut_cli::config_initialization::initialize_configuration_hierarchy;
use reelcut_cli::utils::logging::LoggingConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(&cli)?;
    LoggingConfig::parse(&config.logging.level, &config.logging.format)?.init();
    info!("Starting reelcut");

    let container = DefaultAppContainer::new(&config)?;

    match cli.command {
        Commands::Probe(args) => commands::probe(&container, args).await?,
        Commands::List(args) => commands::list(&container, args).await?,
        Commands::Edit(args) => commands::edit(&container, args).await?,
        Commands::Subtitles(args) => commands::subtitles(args).await?,
        Commands::Transcribe(args) => commands::transcribe(&container, args).await?,
        Commands::Settings(args) => commands::settings(&container, args).await?,
    }

    info!("reelcut completed successfully");
    Ok(())
}
