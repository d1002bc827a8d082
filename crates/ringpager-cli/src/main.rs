use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ringpager_core::{AppConfig, SnapshotMode, WindowStrategy};

mod commands;

#[derive(Parser)]
#[command(name = "ringpager")]
#[command(author, version, about = "An infinite, wrap-around paging strip")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to ~/.config/ringpager/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive strip
    Run(PagerArgs),
    /// Replay a swipe script headlessly and print what the pager reports
    Simulate {
        #[command(flatten)]
        pager: PagerArgs,
        /// Steps: r/l swipe, R/L swipe without settling, `.` settle, g<N> jump
        #[arg(short, long)]
        script: String,
        /// Print JSON lines instead of text
        #[arg(long)]
        json: bool,
        /// Leave pages unrealized until they are drawn
        #[arg(long)]
        unrealized: bool,
    },
    /// Print the effective configuration
    Config {
        /// Save it to the config file
        #[arg(long)]
        write: bool,
    },
}

#[derive(Args)]
struct PagerArgs {
    /// Number of pages
    #[arg(short = 'n', long)]
    pages: Option<usize>,
    /// Slot-filling strategy
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
    /// Capture neighbor snapshots on drag start
    #[arg(long)]
    prefetch: bool,
    /// Start on the middle page
    #[arg(long)]
    middle: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Indexed,
    Rotating,
}

impl PagerArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(pages) = self.pages {
            config.ui.page_count = pages;
        }
        if let Some(strategy) = self.strategy {
            config.pager.strategy = match strategy {
                StrategyArg::Indexed => WindowStrategy::Indexed,
                StrategyArg::Rotating => WindowStrategy::Rotating,
            };
        }
        if self.prefetch {
            config.pager.snapshot_mode = SnapshotMode::Prefetch;
        }
        if self.middle {
            config.pager.start_at_middle = true;
        }
    }
}

/// The interactive strip owns the terminal, so it logs to a file
fn init_logging(config: &AppConfig, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_from(&config_path)?;

    match cli.command {
        Some(Commands::Run(args)) => {
            args.apply(&mut config);
            init_logging(&config, Some(&config.log_path()))?;
            commands::run::run(Arc::new(config))
        }
        None => {
            init_logging(&config, Some(&config.log_path()))?;
            commands::run::run(Arc::new(config))
        }
        Some(Commands::Simulate {
            pager,
            script,
            json,
            unrealized,
        }) => {
            pager.apply(&mut config);
            init_logging(&config, None)?;
            commands::simulate::run(Arc::new(config), &script, json, unrealized)
        }
        Some(Commands::Config { write }) => {
            init_logging(&config, None)?;
            commands::config::run(&config, &config_path, write)
        }
    }
}
