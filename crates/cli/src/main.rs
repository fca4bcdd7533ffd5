//! Savepoint CLI - sp command

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod logging;
mod process;
mod util;

/// Savepoint - rolling snapshots for your Hades II saves
#[derive(Parser)]
#[command(name = "sp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
    /// Take a snapshot of a profile right now
    Snap {
        /// Profile number (1-4)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=4))]
        profile: u8,

        /// Skip the screenshot even if capture is configured
        #[arg(long)]
        no_screenshot: bool,
    },
    /// List snapshots, newest first
    List {
        /// Only show one profile
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=4))]
        profile: Option<u8>,
    },
    /// Restore a snapshot into the live save directory
    Restore {
        /// Snapshot to restore: list index (1 = newest) or folder name
        snapshot: String,

        /// Skip the pre-restore live backup
        #[arg(long)]
        no_backup: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Delete snapshots
    Delete {
        /// Snapshots to delete: list indices (1 = newest) or folder names
        #[arg(required = true)]
        snapshots: Vec<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Watch the save directory and snapshot automatically
    Watch,
    /// Show settings and catalog status
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The watch session additionally logs to a rolling file.
    let _log_guard = logging::init(matches!(cli.command, Commands::Watch));

    match cli.command {
        Commands::Init { force } => cmd::init::run(force),
        Commands::Snap {
            profile,
            no_screenshot,
        } => cmd::snap::run(profile, no_screenshot),
        Commands::List { profile } => cmd::list::run(profile),
        Commands::Restore {
            snapshot,
            no_backup,
            yes,
        } => cmd::restore::run(&snapshot, no_backup, yes),
        Commands::Delete { snapshots, yes } => cmd::delete::run(&snapshots, yes),
        Commands::Watch => cmd::watch::run(),
        Commands::Status => cmd::status::run(),
    }
}
