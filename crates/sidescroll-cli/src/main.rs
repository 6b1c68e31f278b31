use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sidescroll_core::{AppConfig, Direction};

mod commands;

#[derive(Parser)]
#[command(name = "sidescroll")]
#[command(author, version, about = "A terminal carousel that slides a looping strip of items")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/sidescroll/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Seconds for one scroll, overrides the config file
    #[arg(short = 'd', long, global = true)]
    duration: Option<f64>,

    /// Items moved per scroll, overrides the config file
    #[arg(short = 'n', long, global = true)]
    num_to_scroll: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive carousel
    Run,
    /// Run scroll sessions on a simulated track and print every step
    Trace {
        /// Direction to scroll: forward (next) or backward (prev)
        #[arg(short = 'D', long, default_value = "forward")]
        direction: Direction,
        /// Number of sessions to run back to back
        #[arg(long, default_value_t = 1)]
        count: u32,
        /// Item width in pixels, overrides ui.item_width
        #[arg(long)]
        item_width: Option<u32>,
        /// Item left margin in pixels, overrides ui.item_margin
        #[arg(long)]
        margin: Option<u32>,
        /// Print the timelines as JSON
        #[arg(long)]
        json: bool,
        /// Wait out every delay instead of using a virtual clock
        #[arg(long)]
        realtime: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_from(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    if let Some(duration) = cli.duration {
        config.scroller.duration = duration;
    }
    if let Some(num_to_scroll) = cli.num_to_scroll {
        config.scroller.num_to_scroll = num_to_scroll;
    }

    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, interactive)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(Arc::new(config)).await,
        Some(Commands::Trace {
            direction,
            count,
            item_width,
            margin,
            json,
            realtime,
        }) => {
            if let Some(width) = item_width {
                config.ui.item_width = width;
            }
            if let Some(margin) = margin {
                config.ui.item_margin = margin;
            }
            let options = commands::trace::TraceOptions {
                direction,
                count,
                json,
                realtime,
            };
            commands::trace::run(&config, options).await
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => commands::config::path(&config_path),
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
        },
    }
}

/// Install the tracing subscriber. The TUI logs to a file so the alternate
/// screen stays clean; everything else logs to stderr.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        let dir = config.log_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("sidescroll.log"))?;

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
