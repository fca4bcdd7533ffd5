//! Shared helpers for CLI commands

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use savepoint_core::fsops::format_size;
use savepoint_core::timefmt::{format_timestamp, time_ago};
use savepoint_core::Settings;
use savepoint_store::{CommandCapture, NoopCapture, ScreenCapture, Snapshot, SnapshotStore};
use std::io::{self, Write};
use std::path::PathBuf;

/// Default settings file location
pub fn settings_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine the config directory")?;
    Ok(config_dir.join("savepoint").join("config.toml"))
}

/// Load settings, pointing at `sp init` when the file is missing
pub fn load_settings() -> Result<Settings> {
    let path = settings_path()?;
    if !path.is_file() {
        anyhow::bail!(
            "No settings file at {} (run 'sp init' to create one)",
            path.display()
        );
    }
    Settings::load(&path)
}

/// Build the snapshot store described by the settings
pub fn open_store(settings: &Settings) -> SnapshotStore {
    let capture: Box<dyn ScreenCapture> = match &settings.screenshot_command {
        Some(command) => Box::new(CommandCapture::new(command.clone())),
        None => Box::new(NoopCapture),
    };
    SnapshotStore::new(
        settings.save_dir.clone(),
        settings.snapshot_dir.clone(),
        capture,
    )
}

/// Resolve a snapshot reference against a listing
///
/// Accepts a 1-based list index (1 = newest) or a snapshot folder name.
pub fn resolve_snapshot_ref(reference: &str, snapshots: &[Snapshot]) -> Result<Snapshot> {
    if let Ok(index) = reference.parse::<usize>() {
        if index >= 1 && index <= snapshots.len() {
            return Ok(snapshots[index - 1].clone());
        }
        anyhow::bail!(
            "Snapshot index {} out of range (listing has {})",
            index,
            snapshots.len()
        );
    }

    for snapshot in snapshots {
        if snapshot.path.file_name().and_then(|n| n.to_str()) == Some(reference) {
            return Ok(snapshot.clone());
        }
    }

    anyhow::bail!("Unknown snapshot reference: '{}'", reference)
}

/// Folder name of a snapshot, for display
pub fn snapshot_name(snapshot: &Snapshot) -> String {
    snapshot
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("?")
        .to_string()
}

/// Print one listing row
pub fn display_snapshot_row(index: usize, snapshot: &Snapshot, now: i64) {
    println!(
        "{:>4}  P{}  {:<15} {}  {:>10}  {}{}",
        index.yellow(),
        snapshot.profile,
        time_ago(snapshot.timestamp, now),
        format_timestamp(snapshot.timestamp).dimmed(),
        format_size(snapshot.size),
        snapshot_name(snapshot).cyan(),
        if snapshot.has_screenshot {
            "  [shot]"
        } else {
            ""
        },
    );
}

/// Ask for confirmation on the terminal
pub fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes")
}
