use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod console;

use commands::{ConfigCommand, FavCommand, HistoryCommand, PresetCommand, SyncCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "pa")]
#[command(version)]
#[command(about = "Prompt snippets, clipboard history and presets", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage favorite snippets
    Fav(FavCommand),

    /// Manage clipboard history
    History(HistoryCommand),

    /// Manage prompt presets
    Preset(PresetCommand),

    /// Sync favorites with a gist
    Sync(SyncCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config)?;
    tracing::debug!("Data directory: {}", config.data_dir.value.display());

    match &cli.command {
        Some(Commands::Fav(cmd)) => cmd.run(&mut console::open_store(&config))?,
        Some(Commands::History(cmd)) => cmd.run(&mut console::open_store(&config))?,
        Some(Commands::Preset(cmd)) => cmd.run(&mut console::open_store(&config))?,
        Some(Commands::Sync(cmd)) => cmd.run(&mut console::open_store(&config), &config)?,
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => println!("Use --help to see available commands"),
    }

    Ok(())
}
