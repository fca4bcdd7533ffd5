//! Write a default settings file

use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use savepoint_core::Settings;
use std::fs;

pub fn run(force: bool) -> Result<()> {
    let path = util::settings_path()?;

    if path.exists() && !force {
        println!("Settings file already exists at {}", path.display());
        println!("  {}", "Use --force to overwrite it".dimmed());
        return Ok(());
    }

    let settings = Settings::default();
    settings.save(&path)?;
    fs::create_dir_all(&settings.snapshot_dir)
        .with_context(|| format!("Failed to create {}", settings.snapshot_dir.display()))?;

    println!("{}", "Savepoint initialized".bold());
    println!("  Settings:  {}", path.display().to_string().cyan());
    println!("  Saves:     {}", settings.save_dir.display());
    println!("  Snapshots: {}", settings.snapshot_dir.display());
    println!();
    println!("Next steps:");
    println!("  - Edit the settings file if the save directory is wrong");
    println!("  - Run 'sp watch' to snapshot automatically while you play");
    Ok(())
}
