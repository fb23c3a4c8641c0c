mod commands;
mod notifier;
mod render;
mod source;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use contesthub_core::Platform;
use contesthub_core::config::ContestHubConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contesthub")]
#[command(about = "Track coding contests: live status, countdowns, reminders and calendar links")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show contests with their current status and countdown
    List {
        /// Contest snapshot (JSON array); "-" reads stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Only show these platforms
        #[arg(short, long = "platform")]
        platforms: Vec<Platform>,

        /// Hide these platforms
        #[arg(short, long)]
        exclude: Vec<Platform>,
    },
    /// Follow contests live and get a reminder five minutes before each start
    Watch {
        /// Contest snapshot (JSON array); "-" reads stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Only follow these platforms
        #[arg(short, long = "platform")]
        platforms: Vec<Platform>,

        /// Skip these platforms
        #[arg(short, long)]
        exclude: Vec<Platform>,

        /// Re-read the snapshot every N seconds
        #[arg(long, value_name = "SECS")]
        reload: Option<u64>,
    },
    /// Add a contest to Google, Outlook or Apple calendar
    Calendar {
        /// Contest id
        id: String,

        /// google, outlook or apple
        #[arg(short, long)]
        provider: String,

        /// Contest snapshot (JSON array); "-" reads stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the link or .ics content instead of opening/saving it
        #[arg(long)]
        print: bool,
    },
    /// List known platforms and whether they are selected
    Platforms,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = ContestHubConfig::load()?;

    match cli.command {
        Commands::List {
            file,
            platforms,
            exclude,
        } => {
            let selection = commands::selection(&config, &platforms, &exclude);
            commands::list::run(&config, file.as_deref(), selection)
        }
        Commands::Watch {
            file,
            platforms,
            exclude,
            reload,
        } => {
            let selection = commands::selection(&config, &platforms, &exclude);
            commands::watch::run(&config, file, selection, reload).await
        }
        Commands::Calendar {
            id,
            provider,
            file,
            print,
        } => commands::calendar::run(&config, file.as_deref(), &id, &provider, print),
        Commands::Platforms => commands::platforms::run(&config),
    }
}

/// Log to stderr so stdout stays clean. `RUST_LOG` overrides the default level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
