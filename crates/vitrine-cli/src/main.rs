use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_core::{AppConfig, SiteCatalog};

mod commands;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "A terminal showcase with an infinitely looping thumbnail marquee")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Run the two marquee rows headless and print their events
    Simulate {
        /// How long to run, in milliseconds
        #[arg(long, default_value_t = 10_000)]
        duration_ms: u64,
        /// Move the pointer over the row at this time
        #[arg(long)]
        hover_at_ms: Option<u64>,
        /// Move the pointer off the row at this time
        #[arg(long)]
        leave_at_ms: Option<u64>,
        /// Row the pointer targets (0 = top)
        #[arg(long, default_value_t = 0)]
        row: usize,
        /// Override the tick interval from the config
        #[arg(long)]
        speed_ms: Option<i64>,
        /// Print one JSON object per event
        #[arg(long)]
        json: bool,
    },
    /// List the looping sequence of a marquee row
    Items {
        /// Row to list (0 = top, 1 = bottom)
        #[arg(long, default_value_t = 0)]
        row: usize,
    },
}

/// Install the tracing subscriber. The TUI owns the terminal, so it logs
/// to a file in the data directory instead of stderr.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    let (stderr_layer, file_layer) = if to_file {
        fs::create_dir_all(config.data_dir())?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())?;
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file));
        (None, Some(layer))
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);
        (Some(layer), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Ok(())
}

fn load_catalog(config: &AppConfig) -> Result<SiteCatalog> {
    let catalog = match config.catalog_path() {
        Some(path) => SiteCatalog::load(&path)?,
        None => SiteCatalog::builtin()?,
    };
    Ok(catalog)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, tui)?;

    let catalog = load_catalog(&config)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config, catalog).await,
        Some(Commands::Simulate {
            duration_ms,
            hover_at_ms,
            leave_at_ms,
            row,
            speed_ms,
            json,
        }) => {
            let options = commands::simulate::SimulateOptions {
                duration_ms,
                hover_at_ms,
                leave_at_ms,
                row,
                speed_ms,
                json,
            };
            commands::simulate::run(&config, &catalog, options).await
        }
        Some(Commands::Items { row }) => commands::items::run(&config, &catalog, row),
    }
}
