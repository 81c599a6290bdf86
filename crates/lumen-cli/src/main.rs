use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lumen_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(author, version, about = "A single-page site viewer for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/lumen/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Page description (TOML); the built-in sample page when omitted
    #[arg(short = 'p', long = "page", global = true)]
    page: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the page in the terminal
    Run,
    /// Validate a page description
    Check,
    /// Replay an event script without a terminal and print the effects as JSON lines
    Simulate {
        /// TOML event script
        #[arg(short = 's', long)]
        script: PathBuf,
    },
    /// Print the effective configuration
    Config {
        /// Write the default configuration to the config path
        #[arg(short = 'w', long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = Arc::new(
        AppConfig::load_from(&config_path)
            .with_context(|| format!("loading {}", config_path.display()))?,
    );

    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, interactive)?;

    let page_path = cli.page.clone().or_else(|| config.page_path());

    match cli.command {
        Some(Commands::Run) | None => {
            let page = commands::load_page(page_path.as_deref())?;
            commands::run::run(config, page).await
        }
        Some(Commands::Check) => {
            let page = commands::load_page(page_path.as_deref())?;
            commands::check::run(&page).await
        }
        Some(Commands::Simulate { script }) => {
            let page = commands::load_page(page_path.as_deref())?;
            commands::simulate::run(&config, page, &script).await
        }
        Some(Commands::Config { write }) => commands::config::run(&config, &config_path, write).await,
    }
}

/// `RUST_LOG` wins over the configured level. The terminal host logs to a
/// file so output does not tear the screen.
fn init_logging(config: &AppConfig, interactive: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if interactive {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("opening log file {}", log_path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}
